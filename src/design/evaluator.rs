//! Mass, power, thrust and endurance aggregation for a resolved design.
//!
//! The figures are closed-form sums and ratios over catalog values. Warning
//! checks are a flat table of independent rules evaluated against the same
//! unrounded intermediates; every rule runs, none gates another, and their
//! messages are appended in table order.

use crate::catalog::ResolvedComponents;
use crate::design::{DesignResult, round_to};
use crate::environment::Environment;
use log::debug;
use std::collections::BTreeSet;

/// Usable fraction of rated battery capacity (reserve margin).
pub const USABLE_CAPACITY: f64 = 0.92;
/// Ground frames drive on a fraction of the propulsion hover figure.
pub const GROUND_DRIVE_POWER_FACTOR: f64 = 0.35;
/// Below this thrust-to-weight an airborne platform lacks climb margin.
pub const MIN_THRUST_TO_WEIGHT: f64 = 1.3;
/// Looser advisory threshold applied to the environment-adjusted ratio.
pub const ADJUSTED_THRUST_ADVISORY: f64 = 1.35;

/// Unrounded intermediates shared by every warning rule.
struct Figures<'a> {
    components: &'a ResolvedComponents<'a>,
    environment: &'a Environment,
    mass_kg: f64,
    payload_margin_kg: f64,
    thrust_to_weight: f64,
    adjusted_thrust_to_weight: f64,
    power_budget_w: f64,
}

impl Figures<'_> {
    fn airborne(&self) -> bool {
        !self.components.frame.is_ground()
    }
}

struct WarningRule {
    fires: fn(&Figures<'_>) -> bool,
    message: fn(&Figures<'_>) -> String,
}

const WARNING_RULES: &[WarningRule] = &[
    WarningRule {
        fires: |f| f.payload_margin_kg < 0.0,
        message: |f| {
            format!(
                "Payload exceeds frame allowance by {:.2} kg",
                f.payload_margin_kg.abs()
            )
        },
    },
    WarningRule {
        fires: |f| f.mass_kg > f.components.frame.max_takeoff_kg,
        message: |f| {
            format!(
                "All-up weight {:.2} kg exceeds frame MTOW {:.2} kg",
                f.mass_kg, f.components.frame.max_takeoff_kg
            )
        },
    },
    WarningRule {
        // An empty list cannot be told apart from "not compatible".
        fires: |f| {
            let frame_id = &f.components.frame.id;
            !f.components
                .propulsion
                .compatible_frames
                .iter()
                .any(|id| id == frame_id)
        },
        message: |_| "Propulsion does not list this frame as compatible".to_string(),
    },
    WarningRule {
        fires: |f| f.airborne() && f.thrust_to_weight < MIN_THRUST_TO_WEIGHT,
        message: |_| "Thrust-to-weight below 1.3: limited climb/station-keep margin".to_string(),
    },
    WarningRule {
        fires: |f| f.airborne() && f.adjusted_thrust_to_weight < MIN_THRUST_TO_WEIGHT,
        message: |f| {
            format!(
                "Environment-adjusted thrust-to-weight {:.2} below 1.3 at {}: thin high-altitude margin",
                f.adjusted_thrust_to_weight,
                f.environment.altitude().label
            )
        },
    },
    WarningRule {
        fires: |f| f.airborne() && f.adjusted_thrust_to_weight < ADJUSTED_THRUST_ADVISORY,
        message: |f| {
            format!(
                "Adjusted thrust-to-weight {:.2} below 1.35: little reserve for gusts or payload growth",
                f.adjusted_thrust_to_weight
            )
        },
    },
    WarningRule {
        fires: |f| f.power_budget_w > f.components.battery.continuous_discharge_w,
        message: |f| {
            format!(
                "Power draw {:.1} W exceeds battery continuous rating {:.1} W",
                f.power_budget_w, f.components.battery.continuous_discharge_w
            )
        },
    },
];

/// Evaluate resolved components under an environment.
pub fn evaluate(components: &ResolvedComponents<'_>, environment: &Environment) -> DesignResult {
    let frame = components.frame;
    let propulsion = components.propulsion;
    let battery = components.battery;
    let compute = components.compute;
    let radio = components.radio;

    let payload_mass: f64 = components.payloads.iter().map(|p| p.mass_kg).sum();
    let mass_kg = frame.empty_mass_kg
        + payload_mass
        + propulsion.mass_kg
        + battery.mass_kg
        + compute.mass_kg
        + radio.mass_kg;
    let payload_margin_kg = frame.max_payload_kg - payload_mass;
    let thrust_to_weight = thrust_ratio(propulsion.thrust_kg, mass_kg);

    let hover_power = if frame.is_ground() {
        propulsion.hover_power_w * GROUND_DRIVE_POWER_FACTOR
    } else {
        propulsion.hover_power_w
    };
    let payload_power: f64 = components.payloads.iter().map(|p| p.power_w).sum();
    let power_budget_w = hover_power + payload_power + compute.power_w + radio.power_w;

    let altitude = environment.altitude();
    let temperature = environment.temperature();
    let adjusted_thrust_to_weight =
        thrust_ratio(propulsion.thrust_kg * altitude.thrust_efficiency, mass_kg);

    let usable_wh = battery.capacity_wh * USABLE_CAPACITY;
    let estimated_endurance_min = endurance_minutes(usable_wh, power_budget_w);
    let adjusted_endurance_min = endurance_minutes(
        usable_wh * temperature.capacity_factor,
        power_budget_w * (1.0 + altitude.power_penalty),
    );

    let role_tags: BTreeSet<&str> = frame
        .role_tags
        .iter()
        .chain(&radio.role_tags)
        .chain(&compute.role_tags)
        .chain(components.payloads.iter().flat_map(|p| &p.role_tags))
        .map(String::as_str)
        .collect();

    let figures = Figures {
        components,
        environment,
        mass_kg,
        payload_margin_kg,
        thrust_to_weight,
        adjusted_thrust_to_weight,
        power_budget_w,
    };
    let warnings: Vec<String> = WARNING_RULES
        .iter()
        .filter(|rule| (rule.fires)(&figures))
        .map(|rule| (rule.message)(&figures))
        .collect();

    debug!(
        "evaluated {}: {:.3} kg, {:.1} W, {} warning(s)",
        frame.id,
        mass_kg,
        power_budget_w,
        warnings.len()
    );

    DesignResult {
        mass_kg: round_to(mass_kg, 2),
        payload_margin_kg: round_to(payload_margin_kg, 2),
        thrust_to_weight: round_to(thrust_to_weight, 2),
        adjusted_thrust_to_weight: round_to(adjusted_thrust_to_weight, 2),
        estimated_endurance_min: round_to(estimated_endurance_min, 1),
        adjusted_endurance_min: round_to(adjusted_endurance_min, 1),
        power_budget_w: round_to(power_budget_w, 1),
        role_tags: role_tags.into_iter().map(str::to_string).collect(),
        warnings,
        environment: *environment,
    }
}

fn thrust_ratio(thrust_kg: f64, mass_kg: f64) -> f64 {
    if mass_kg == 0.0 {
        0.0
    } else {
        thrust_kg / mass_kg
    }
}

fn endurance_minutes(usable_wh: f64, power_w: f64) -> f64 {
    (usable_wh / power_w.max(1.0)) * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::sample_catalog;
    use crate::catalog::{Catalog, resolve_selection};
    use crate::design::ComponentSelection;
    use crate::environment::{AltitudeBand, TemperatureBand};

    fn run(catalog: &Catalog, payloads: &[&str], env: Environment) -> DesignResult {
        run_frame(catalog, "quad-x", payloads, env)
    }

    fn run_frame(
        catalog: &Catalog,
        frame: &str,
        payloads: &[&str],
        env: Environment,
    ) -> DesignResult {
        let selection = ComponentSelection::new(frame, "prop-a", "batt-a", "cpu-a", "radio-a")
            .with_payloads(payloads.iter().copied());
        let components = resolve_selection(catalog, &selection).unwrap();
        evaluate(&components, &env)
    }

    fn with_thrust(thrust_kg: f64) -> Catalog {
        let mut catalog = sample_catalog();
        catalog.propulsion.as_mut().unwrap()[0].thrust_kg = thrust_kg;
        catalog
    }

    #[test]
    fn nominal_quad_figures() {
        let result = run(&sample_catalog(), &["eo-cam"], Environment::default());
        assert_eq!(result.mass_kg, 2.6);
        assert_eq!(result.payload_margin_kg, 0.8);
        assert_eq!(result.thrust_to_weight, 2.31);
        assert_eq!(result.adjusted_thrust_to_weight, 2.31);
        assert_eq!(result.power_budget_w, 420.0);
        assert_eq!(result.estimated_endurance_min, 13.1);
        assert_eq!(result.adjusted_endurance_min, 13.1);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn environment_derates_thrust_power_and_capacity() {
        let env = Environment::new(AltitudeBand::Mountain, TemperatureBand::Freezing);
        let result = run(&sample_catalog(), &["eo-cam"], env);
        assert_eq!(result.thrust_to_weight, 2.31);
        assert_eq!(result.adjusted_thrust_to_weight, 1.85);
        assert_eq!(result.estimated_endurance_min, 13.1);
        assert_eq!(result.adjusted_endurance_min, 8.0);
        assert_eq!(result.environment, env);
    }

    #[test]
    fn ground_frame_scales_power_and_skips_thrust_rules() {
        let result = run_frame(&sample_catalog(), "rover-g", &[], Environment::default());
        assert_eq!(result.mass_kg, 7.2);
        assert_eq!(result.thrust_to_weight, 0.83);
        assert_eq!(result.power_budget_w, 155.0);
        assert_eq!(result.estimated_endurance_min, 35.6);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn zero_mass_gives_zero_ratios() {
        let mut catalog = sample_catalog();
        catalog.frames.as_mut().unwrap()[0].empty_mass_kg = 0.0;
        catalog.propulsion.as_mut().unwrap()[0].mass_kg = 0.0;
        catalog.batteries.as_mut().unwrap()[0].mass_kg = 0.0;
        catalog.compute.as_mut().unwrap()[0].mass_kg = 0.0;
        catalog.radios.as_mut().unwrap()[0].mass_kg = 0.0;
        let result = run(
            &catalog,
            &[],
            Environment::new(AltitudeBand::HighDesert, TemperatureBand::Standard),
        );
        assert_eq!(result.mass_kg, 0.0);
        assert_eq!(result.thrust_to_weight, 0.0);
        assert_eq!(result.adjusted_thrust_to_weight, 0.0);
    }

    #[test]
    fn zero_power_draw_is_clamped() {
        let mut catalog = sample_catalog();
        catalog.propulsion.as_mut().unwrap()[0].hover_power_w = 0.0;
        catalog.compute.as_mut().unwrap()[0].power_w = 0.0;
        catalog.radios.as_mut().unwrap()[0].power_w = 0.0;
        let result = run(&catalog, &[], Environment::default());
        assert_eq!(result.power_budget_w, 0.0);
        assert_eq!(result.estimated_endurance_min, 5520.0);
    }

    #[test]
    fn mtow_warning_cites_both_masses() {
        let mut catalog = sample_catalog();
        let frame = &mut catalog.frames.as_mut().unwrap()[0];
        frame.empty_mass_kg = 1.1;
        frame.max_takeoff_kg = 2.0;
        let result = run(&catalog, &["eo-cam"], Environment::default());
        assert_eq!(result.mass_kg, 2.5);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("2.50") && w.contains("2.00") && w.contains("MTOW")),
            "{:?}",
            result.warnings
        );
    }

    #[test]
    fn overload_reports_excess_mass() {
        let result = run(
            &sample_catalog(),
            &["sigint-pod", "sigint-pod", "sigint-pod", "sigint-pod"],
            Environment::default(),
        );
        assert_eq!(result.payload_margin_kg, -0.2);
        assert_eq!(
            result.warnings[0],
            "Payload exceeds frame allowance by 0.20 kg"
        );
    }

    #[test]
    fn empty_compatibility_list_always_warns() {
        let mut catalog = sample_catalog();
        catalog.propulsion.as_mut().unwrap()[0]
            .compatible_frames
            .clear();
        let result = run(&catalog, &[], Environment::default());
        assert_eq!(
            result.warnings,
            vec!["Propulsion does not list this frame as compatible".to_string()]
        );
    }

    #[test]
    fn low_thrust_fires_all_three_margin_rules_in_order() {
        let result = run(&with_thrust(3.3), &["eo-cam"], Environment::default());
        assert_eq!(result.warnings.len(), 3, "{:?}", result.warnings);
        assert!(result.warnings[0].starts_with("Thrust-to-weight below 1.3"));
        assert!(result.warnings[1].starts_with("Environment-adjusted thrust-to-weight 1.27"));
        assert!(result.warnings[1].contains("Sea level"));
        assert!(result.warnings[2].starts_with("Adjusted thrust-to-weight 1.27 below 1.35"));
    }

    #[test]
    fn advisory_threshold_layers_on_altitude_rule() {
        // 3.4 / 2.6 = 1.308: clears 1.3 at sea level but not the 1.35 advisory.
        let sea = run(&with_thrust(3.4), &["eo-cam"], Environment::default());
        assert_eq!(sea.warnings.len(), 1, "{:?}", sea.warnings);
        assert!(sea.warnings[0].contains("below 1.35"));

        let desert = run(
            &with_thrust(3.4),
            &["eo-cam"],
            Environment::new(AltitudeBand::HighDesert, TemperatureBand::Standard),
        );
        assert_eq!(desert.warnings.len(), 2, "{:?}", desert.warnings);
        assert!(desert.warnings[0].contains("High desert"));
        assert!(desert.warnings[1].contains("below 1.35"));
    }

    #[test]
    fn thresholds_compare_unrounded_values() {
        // 3.3786 / 2.6 = 1.29946: rounds to 1.30 but still trips the 1.3 rule.
        let result = run(&with_thrust(3.3786), &["eo-cam"], Environment::default());
        assert_eq!(result.thrust_to_weight, 1.3);
        assert!(result.warnings[0].starts_with("Thrust-to-weight below 1.3"));
    }

    #[test]
    fn discharge_limit_is_last() {
        let mut catalog = with_thrust(3.3);
        catalog.batteries.as_mut().unwrap()[0].continuous_discharge_w = 300.0;
        let result = run(&catalog, &["eo-cam"], Environment::default());
        assert_eq!(result.warnings.len(), 4);
        assert_eq!(
            result.warnings[3],
            "Power draw 420.0 W exceeds battery continuous rating 300.0 W"
        );
    }

    #[test]
    fn role_tags_are_sorted_and_deduplicated() {
        let mut catalog = sample_catalog();
        catalog.compute.as_mut().unwrap()[0].role_tags.clear();
        catalog.radios.as_mut().unwrap()[0].role_tags.clear();
        let result = run(&catalog, &["eo-cam", "sigint-pod"], Environment::default());
        assert_eq!(result.role_tags, vec!["ew", "isr", "recon"]);
    }

    #[test]
    fn mass_is_additive_over_payloads() {
        let one = run(&sample_catalog(), &["eo-cam"], Environment::default());
        let two = run(&sample_catalog(), &["eo-cam", "eo-cam"], Environment::default());
        let reordered = run(&sample_catalog(), &["sigint-pod", "eo-cam"], Environment::default());
        let forward = run(&sample_catalog(), &["eo-cam", "sigint-pod"], Environment::default());
        assert_eq!(round_to(two.mass_kg - one.mass_kg, 2), 0.2);
        assert_eq!(two.power_budget_w - one.power_budget_w, 5.0);
        assert_eq!(reordered.mass_kg, forward.mass_kg);
    }
}
