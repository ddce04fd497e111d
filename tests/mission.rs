// MissionProject import, export, and overlays over the WHITEFROST preset.
mod support;

use anyhow::Result;
use serde_json::{Value, json};
use support::{bundled_catalog, read_json, whitefrost_path};
use tempfile::TempDir;
use uxs_architect::mission::{
    ExportOptions, MissionSummary, build_mission_platform, extend_catalog_with_nodes,
    load_mission_project, mission_project_to_cot, mission_project_to_geojson, normalize_nodes,
    project_bundle, write_json_atomic,
};
use uxs_architect::{ComponentSelection, Environment, Payload, Radio, evaluate_design};

// Preset nodes normalize across the weight and power spellings.
#[test]
fn whitefrost_nodes_normalize() -> Result<()> {
    let project = load_mission_project(&whitefrost_path())?;
    let nodes = normalize_nodes(project_bundle(&project));
    let ids: Vec<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["wf-relay-1", "wf-sensor-2", "wf-cp"]);

    assert_eq!(nodes[0].mass_kg, 0.45);
    assert_eq!(nodes[0].role_tags, vec!["relay", "mesh"]);
    assert_eq!(nodes[1].weight_grams, 320.0);
    assert_eq!(nodes[1].power_draw_w, 2.0);
    assert_eq!(nodes[1].role_tags, vec!["isr"]);
    assert_eq!(nodes[2].rf_band_ghz, Some(2.4));
    Ok(())
}

// Imported nodes can be mounted as payload and radio on a design.
#[test]
fn imported_nodes_mount_on_a_design() -> Result<()> {
    let catalog = bundled_catalog()?;
    let project = load_mission_project(&whitefrost_path())?;
    let nodes = normalize_nodes(project_bundle(&project));
    let extended = extend_catalog_with_nodes(&catalog, &nodes);

    assert_eq!(
        extended.records::<Payload>()?.len(),
        catalog.records::<Payload>()?.len() + nodes.len()
    );
    assert!(catalog.lookup::<Radio>("wf-relay-1-radio").is_err());
    let radio = extended.lookup::<Radio>("wf-relay-1-radio")?;
    assert_eq!(radio.power_w, 6.5);

    let selection = ComponentSelection::new(
        "quad-x8",
        "t-motor-mn501",
        "li-ion-6s-22ah",
        "jetson-orin-nx",
        "wf-relay-1-radio",
    )
    .with_payloads(["eo-ir-gimbal", "wf-relay-1-payload"])
    .with_mounted_nodes(["wf-relay-1"]);
    let result = evaluate_design(&extended, &selection, None, None)?;
    assert_eq!(result.mass_kg, 8.7);
    assert_eq!(result.power_budget_w, 948.0);
    assert_eq!(
        result.role_tags,
        vec!["autonomy", "isr", "logistics", "mesh", "relay"]
    );
    Ok(())
}

// The exported platform mirrors the result and survives a round trip to disk.
#[test]
fn exported_bundle_copies_result_figures() -> Result<()> {
    let catalog = bundled_catalog()?;
    let selection = ComponentSelection::new(
        "quad-x8",
        "t-motor-mn501",
        "li-ion-6s-22ah",
        "jetson-orin-nx",
        "doodle-mini",
    )
    .with_payloads(["eo-ir-gimbal"]);
    let environment = Environment::from_names("high_desert", "cold");
    let result = evaluate_design(&catalog, &selection, Some(&environment), None)?;
    let bundle = build_mission_platform(
        &selection,
        &result,
        &environment,
        &ExportOptions::default(),
        &[],
    );

    let temp = TempDir::new()?;
    let path = temp.path().join("export.json");
    write_json_atomic(&path, &bundle)?;
    let written = read_json(&path)?;
    assert_eq!(written, bundle);

    let platform = &written["platforms"][0];
    assert_eq!(platform["id"], "plt-quad-x8");
    assert_eq!(platform["name"], "UxS platform");
    assert_eq!(platform["auw_kg"], json!(result.mass_kg));
    assert_eq!(
        platform["adjusted_thrust_to_weight"],
        json!(result.adjusted_thrust_to_weight)
    );
    assert_eq!(platform["intended_roles"], json!(result.role_tags));
    assert_eq!(written["environment"][0]["altitude_band"], "high_desert");
    assert_eq!(written["environment"][0]["temperature_band"], "cold");
    assert!(written.get("nodes").is_none());
    Ok(())
}

// Five located items and three resolvable links in the preset.
#[test]
fn whitefrost_overlay_and_cot() -> Result<()> {
    let project = load_mission_project(&whitefrost_path())?;

    let geo = mission_project_to_geojson(&project);
    let features = geo["features"].as_array().cloned().unwrap_or_default();
    assert_eq!(features.len(), 8);
    let links: Vec<&Value> = features
        .iter()
        .filter(|feature| feature["properties"]["type"] == "mesh_link")
        .collect();
    assert_eq!(links.len(), 3);
    assert_eq!(links[2]["properties"]["notes"], "Sub-GHz backhaul");

    let cot = mission_project_to_cot(&project);
    let events = cot["events"].as_array().cloned().unwrap_or_default();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["remarks"], "WHITEFROST overwatch quad (isr, relay)");
    assert_eq!(events[1]["point"]["hae"], Value::Null);
    assert_eq!(events[3]["remarks"], "Valley acoustic sensor (isr)");

    assert_eq!(
        MissionSummary::from_project(&project).to_string(),
        "Mission: Project WHITEFROST | platforms: 2 | nodes: 3 | mesh links: 3"
    );
    Ok(())
}

// Non-object documents are refused.
#[test]
fn array_document_is_not_a_project() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("project.json");
    std::fs::write(&path, "[1, 2, 3]")?;
    let err = load_mission_project(&path).unwrap_err();
    assert!(format!("{err:#}").contains("must be a JSON object"));
    Ok(())
}
