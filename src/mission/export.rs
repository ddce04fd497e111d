//! MissionProject export for an evaluated platform.

use crate::design::{ComponentSelection, DesignResult};
use crate::environment::Environment;
use crate::mission::{MissionNode, ORIGIN_TOOL};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const BUNDLE_VERSION: &str = "1.0";

/// Caller overrides for the exported platform record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Roles to advertise; empty falls back to the result's role tags.
    pub intended_roles: Vec<String>,
    pub platform_id: Option<String>,
    pub platform_name: Option<String>,
}

/// Build a MissionProject bundle holding one platform.
///
/// All figures are copied from `result`; nothing is recomputed. Imported nodes
/// ride along so the bundle stays self-contained.
pub fn build_mission_platform(
    selection: &ComponentSelection,
    result: &DesignResult,
    environment: &Environment,
    options: &ExportOptions,
    nodes: &[MissionNode],
) -> Value {
    let intended_roles = if options.intended_roles.is_empty() {
        &result.role_tags
    } else {
        &options.intended_roles
    };
    let platform_id = options
        .platform_id
        .clone()
        .unwrap_or_else(|| format!("plt-{}", selection.frame));
    let platform_name = options
        .platform_name
        .as_deref()
        .unwrap_or("UxS platform");

    let platform = json!({
        "id": platform_id,
        "name": platform_name,
        "origin_tool": ORIGIN_TOOL,
        "frame_type": selection.frame,
        "auw_kg": result.mass_kg,
        "nominal_endurance_min": result.estimated_endurance_min,
        "adjusted_endurance_min": result.adjusted_endurance_min,
        "thrust_to_weight": result.thrust_to_weight,
        "adjusted_thrust_to_weight": result.adjusted_thrust_to_weight,
        "mounted_node_ids": selection.mounted_nodes,
        "payload_ids": selection.payloads,
        "intended_roles": intended_roles,
        "environment": environment,
    });

    let mut bundle = json!({
        "version": BUNDLE_VERSION,
        "origin_tool": ORIGIN_TOOL,
        "mission": {"id": "mission-local", "name": "Mission export", "origin_tool": "mission"},
        "environment": [{
            "id": "env-local",
            "altitude_band": environment.altitude_band,
            "temperature_band": environment.temperature_band,
        }],
        "platforms": [platform],
    });
    if !nodes.is_empty() {
        bundle["nodes"] = json!(nodes);
    }
    bundle
}

/// Pretty-print `value` to `path` via a sibling temp file.
///
/// The destination only changes once the whole document is written.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut temp, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    temp.write_all(b"\n")
        .with_context(|| format!("writing {}", path.display()))?;
    temp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
