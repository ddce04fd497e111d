//! Operator-supplied thresholds checked after evaluation.
//!
//! Constraint warnings are appended after the evaluator's own warnings; they
//! never replace or reorder them. Unset thresholds are not checked.

use crate::design::DesignResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSettings {
    #[serde(default)]
    pub min_thrust_to_weight: Option<f64>,
    #[serde(default)]
    pub min_adjusted_endurance_min: Option<f64>,
    #[serde(default)]
    pub max_auw_kg: Option<f64>,
}

impl ConstraintSettings {
    pub fn is_empty(&self) -> bool {
        self.min_thrust_to_weight.is_none()
            && self.min_adjusted_endurance_min.is_none()
            && self.max_auw_kg.is_none()
    }
}

/// Warnings for every violated threshold, in AUW, thrust, endurance order.
pub fn constraint_warnings(result: &DesignResult, constraints: &ConstraintSettings) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(max_auw) = constraints.max_auw_kg {
        if result.mass_kg > max_auw {
            warnings.push(format!(
                "AUW {:.2} kg exceeds constraint maximum {:.2} kg",
                result.mass_kg, max_auw
            ));
        }
    }
    if let Some(min_twr) = constraints.min_thrust_to_weight {
        if result.adjusted_thrust_to_weight < min_twr {
            warnings.push(format!(
                "Adjusted thrust-to-weight {:.2} below constraint minimum {:.2}",
                result.adjusted_thrust_to_weight, min_twr
            ));
        }
    }
    if let Some(min_endurance) = constraints.min_adjusted_endurance_min {
        if result.adjusted_endurance_min < min_endurance {
            warnings.push(format!(
                "Adjusted endurance {:.1} min below constraint minimum {:.1} min",
                result.adjusted_endurance_min, min_endurance
            ));
        }
    }
    warnings
}

/// Return `result` with constraint warnings appended.
pub fn apply_constraints(mut result: DesignResult, constraints: &ConstraintSettings) -> DesignResult {
    let extra = constraint_warnings(&result, constraints);
    result.warnings.extend(extra);
    result
}
