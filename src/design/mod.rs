//! Design evaluation.
//!
//! A `ComponentSelection` names one id per singular category plus payloads.
//! `evaluate_design` resolves it against a catalog, runs the evaluator under an
//! environment, and layers optional operator constraints on top. Everything
//! here is a pure function of its inputs; the catalog is only read.

pub mod constraints;
pub mod evaluator;

pub use constraints::{ConstraintSettings, apply_constraints, constraint_warnings};
pub use evaluator::{
    ADJUSTED_THRUST_ADVISORY, GROUND_DRIVE_POWER_FACTOR, MIN_THRUST_TO_WEIGHT, USABLE_CAPACITY,
    evaluate,
};

use crate::catalog::{Catalog, resolve_selection};
use crate::environment::Environment;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Component ids picked for one platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSelection {
    pub frame: String,
    pub propulsion: String,
    pub battery: String,
    pub compute: String,
    pub radio: String,
    /// Payload ids in mount order. Repeats mount the same payload twice.
    #[serde(default)]
    pub payloads: Vec<String>,
    /// Node ids carried for traceability; never resolved or computed on.
    #[serde(default)]
    pub mounted_nodes: Vec<String>,
}

impl ComponentSelection {
    pub fn new(
        frame: impl Into<String>,
        propulsion: impl Into<String>,
        battery: impl Into<String>,
        compute: impl Into<String>,
        radio: impl Into<String>,
    ) -> Self {
        Self {
            frame: frame.into(),
            propulsion: propulsion.into(),
            battery: battery.into(),
            compute: compute.into(),
            radio: radio.into(),
            payloads: Vec::new(),
            mounted_nodes: Vec::new(),
        }
    }

    pub fn with_payloads<I, S>(mut self, payloads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payloads = payloads.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mounted_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mounted_nodes = nodes.into_iter().map(Into::into).collect();
        self
    }
}

/// Aggregate figures for one evaluated design.
///
/// Numbers are rounded once at construction (mass, margin and ratios to two
/// decimals, power and endurance to one). Warnings keep detection order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub mass_kg: f64,
    pub payload_margin_kg: f64,
    pub thrust_to_weight: f64,
    pub adjusted_thrust_to_weight: f64,
    pub estimated_endurance_min: f64,
    pub adjusted_endurance_min: f64,
    pub power_budget_w: f64,
    pub role_tags: Vec<String>,
    pub warnings: Vec<String>,
    pub environment: Environment,
}

impl DesignResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Resolve, evaluate, and check constraints in one call.
///
/// `None` for the environment means sea level at standard temperature; `None`
/// for constraints skips the operator checks.
pub fn evaluate_design(
    catalog: &Catalog,
    selection: &ComponentSelection,
    environment: Option<&Environment>,
    constraints: Option<&ConstraintSettings>,
) -> Result<DesignResult, CatalogError> {
    let components = resolve_selection(catalog, selection)?;
    let environment = environment.copied().unwrap_or_default();
    let result = evaluate(&components, &environment);
    Ok(match constraints {
        Some(settings) => apply_constraints(result, settings),
        None => result,
    })
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
