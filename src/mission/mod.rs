//! MissionProject interchange.
//!
//! MissionProject bundles are loosely-typed JSON documents shared with other
//! planning tools, so this module works on `serde_json::Value` and only types
//! what it produces. Nothing here recomputes design figures: exports copy the
//! numbers from the `DesignResult` they are handed.

pub mod export;
pub mod import;
pub mod overlay;

pub use export::{ExportOptions, build_mission_platform, write_json_atomic};
pub use import::{
    MissionNode, extend_catalog_with_nodes, load_mission_project, normalize_nodes, project_bundle,
};
pub use overlay::{Location, MissionSummary, mission_project_to_cot, mission_project_to_geojson};

use serde_json::Value;

/// Default origin tag for records this tool writes.
pub const ORIGIN_TOOL: &str = "uxs";

/// Default relative path to the WHITEFROST preset bundle.
pub const WHITEFROST_PATH: &str = "data/whitefrost_mission_project.json";

/// First present, non-empty value among `keys`.
///
/// Null, empty strings, empty arrays and empty objects count as absent, so
/// fallbacks behave the same whether a producer omitted a field or blanked it.
pub(crate) fn first_present<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .find(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Numbers or numeric strings as f64.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strings as-is, numbers rendered; anything else is not an identifier.
pub(crate) fn as_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A role field that may be a single tag or a list of tags.
pub(crate) fn as_tags(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
