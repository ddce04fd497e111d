//! MissionProject loading and node import.
//!
//! Nodes from a bundle become extra catalog records so a design can mount
//! them: each node yields a payload, a compute and a radio entry with
//! `-payload`, `-compute` and `-radio` id suffixes.

use crate::catalog::{Catalog, Compute, Payload, Radio};
use crate::design::round_to;
use crate::mission::{as_identifier, as_number, as_tags, first_present};
use anyhow::{Context, Result, bail};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Power assumed for node compute/radio entries that report none.
const DEFAULT_NODE_POWER_W: f64 = 5.0;

/// A bundle node normalized to the fields this tool understands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionNode {
    pub id: String,
    pub name: String,
    pub weight_grams: f64,
    pub mass_kg: f64,
    pub power_draw_w: f64,
    pub role_tags: Vec<String>,
    pub rf_band_ghz: Option<f64>,
    pub origin_tool: String,
    pub notes: String,
}

pub fn load_mission_project(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading MissionProject {}", path.display()))?;
    let project: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing MissionProject {}", path.display()))?;
    if !project.is_object() {
        bail!(
            "MissionProject {} must be a JSON object",
            path.display()
        );
    }
    Ok(project)
}

/// The bundle inside a project: its `mission_project` member when present.
pub fn project_bundle(project: &Value) -> &Value {
    match project.get("mission_project") {
        Some(bundle) if bundle.as_object().is_some_and(|map| !map.is_empty()) => bundle,
        _ => project,
    }
}

/// Normalize `nodes[]` from a bundle, dropping entries with no usable id.
pub fn normalize_nodes(bundle: &Value) -> Vec<MissionNode> {
    let Some(nodes) = bundle.get("nodes").and_then(Value::as_array) else {
        return Vec::new();
    };
    nodes.iter().filter_map(normalize_node).collect()
}

fn normalize_node(node: &Value) -> Option<MissionNode> {
    let id = first_present(node, &["id", "node_id", "uuid", "name"]).and_then(as_identifier)?;
    let weight_grams = node
        .get("weight_grams")
        .and_then(as_number)
        .or_else(|| node.get("mass_kg").and_then(as_number).map(|kg| kg * 1000.0))
        .unwrap_or(0.0);
    // A zero draw counts as unreported, so `power_w` still gets a say.
    let power_draw_w = ["power_draw_w", "power_w"]
        .iter()
        .filter_map(|key| node.get(key).and_then(as_number))
        .find(|watts| *watts != 0.0)
        .unwrap_or(0.0);
    let weight_grams = non_negative(&id, "weight", weight_grams);
    let power_draw_w = non_negative(&id, "power draw", power_draw_w);
    let role_tags = first_present(node, &["role", "role_tags"])
        .map(as_tags)
        .unwrap_or_default();

    Some(MissionNode {
        id,
        name: string_or(node, "name", "Imported node"),
        weight_grams,
        mass_kg: weight_grams / 1000.0,
        power_draw_w,
        role_tags,
        rf_band_ghz: node.get("rf_band_ghz").and_then(as_number),
        origin_tool: string_or(node, "origin_tool", "node"),
        notes: string_or(node, "notes", "Imported from MissionProject"),
    })
}

/// Catalog figures cannot go below zero; negative node readings are clamped.
fn non_negative(id: &str, field: &str, value: f64) -> f64 {
    if value < 0.0 {
        warn!("node {id}: negative {field} {value} clamped to 0");
        0.0
    } else {
        value
    }
}

fn string_or(node: &Value, key: &str, default: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Copy of `catalog` with payload, compute and radio entries for each node.
///
/// Categories the catalog lacks are created. The input catalog is untouched.
pub fn extend_catalog_with_nodes(catalog: &Catalog, nodes: &[MissionNode]) -> Catalog {
    let mut augmented = catalog.clone();
    if nodes.is_empty() {
        return augmented;
    }

    let payloads = augmented.payloads.get_or_insert_with(Vec::new);
    for node in nodes {
        payloads.push(Payload {
            id: format!("{}-payload", node.id),
            name: format!("{} (payload)", node.name),
            mass_kg: round_to(node.mass_kg, 3),
            power_w: round_to(node.power_draw_w, 2),
            role_tags: node.role_tags.clone(),
            notes: Some(node.notes.clone()),
        });
    }

    let compute = augmented.compute.get_or_insert_with(Vec::new);
    for node in nodes {
        compute.push(Compute {
            id: format!("{}-compute", node.id),
            name: format!("{} (compute)", node.name),
            mass_kg: round_to(node.mass_kg, 3),
            power_w: node_power_or_default(node),
            ai_tops: 0.0,
            role_tags: node.role_tags.clone(),
            notes: Some(node.notes.clone()),
        });
    }

    let radios = augmented.radios.get_or_insert_with(Vec::new);
    for node in nodes {
        radios.push(Radio {
            id: format!("{}-radio", node.id),
            name: format!("{} (radio)", node.name),
            mass_kg: round_to(node.mass_kg, 3),
            power_w: node_power_or_default(node),
            range_km: 0.0,
            rf_band_ghz: node.rf_band_ghz,
            role_tags: node.role_tags.clone(),
            notes: Some(node.notes.clone()),
        });
    }

    debug!("extended catalog with {} imported node(s)", nodes.len());
    augmented
}

fn node_power_or_default(node: &MissionNode) -> f64 {
    let power = round_to(node.power_draw_w, 2);
    if power == 0.0 {
        DEFAULT_NODE_POWER_W
    } else {
        power
    }
}
