//! GeoJSON and CoT-style views of a MissionProject.
//!
//! Only items with a usable `location` (numeric `lat` and `lon`) are drawn.
//! Mesh links become line strings when both endpoints were drawn.

use crate::mission::{ORIGIN_TOOL, as_number, as_tags, first_present, project_bundle};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

const PLATFORM_COT_TYPE: &str = "a-f-A-M-UxS";
const NODE_COT_TYPE: &str = "b-r-f";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl Location {
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        let loc = value?.as_object()?;
        let lat = loc.get("lat").and_then(as_number)?;
        let lon = loc.get("lon").and_then(as_number)?;
        Some(Self {
            lat,
            lon,
            elevation_m: loc.get("elevation_m").and_then(as_number),
        })
    }

    /// GeoJSON order: lon, lat, then elevation when known.
    fn coordinates(&self) -> Vec<f64> {
        let mut coords = vec![self.lon, self.lat];
        if let Some(elevation) = self.elevation_m {
            coords.push(elevation);
        }
        coords
    }
}

/// Counts for the one-line mission overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionSummary {
    pub name: String,
    pub platforms: usize,
    pub nodes: usize,
    pub mesh_links: usize,
}

impl MissionSummary {
    pub fn from_project(project: &Value) -> Self {
        let bundle = project_bundle(project);
        let count = |key: &str| bundle.get(key).and_then(Value::as_array).map_or(0, Vec::len);
        Self {
            name: bundle
                .pointer("/mission/name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            platforms: count("platforms"),
            nodes: count("nodes"),
            mesh_links: count("mesh_links"),
        }
    }
}

impl fmt::Display for MissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mission: {} | platforms: {} | nodes: {} | mesh links: {}",
            self.name, self.platforms, self.nodes, self.mesh_links
        )
    }
}

fn items<'a>(bundle: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    bundle
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn origin_tool(item: &Value, bundle: &Value) -> Value {
    item.get("origin_tool")
        .or_else(|| bundle.get("origin_tool"))
        .cloned()
        .unwrap_or_else(|| json!(ORIGIN_TOOL))
}

fn field(item: &Value, key: &str) -> Value {
    item.get(key).cloned().unwrap_or(Value::Null)
}

/// Copy the RF, power and reference fields both views carry.
fn shared_detail(item: &Value, bundle: &Value) -> Map<String, Value> {
    let mut detail = Map::new();
    detail.insert("origin_tool".to_string(), origin_tool(item, bundle));
    for key in [
        "rf_band_ghz",
        "rf_bands_ghz",
        "power_draw_w",
        "power_budget_w",
        "environment_ref",
        "constraints_ref",
    ] {
        detail.insert(key.to_string(), field(item, key));
    }
    detail
}

/// GeoJSON FeatureCollection: node and platform points, then mesh links.
pub fn mission_project_to_geojson(project: &Value) -> Value {
    let bundle = project_bundle(project);
    let mut features: Vec<Value> = Vec::new();
    let mut located: BTreeMap<String, Location> = BTreeMap::new();

    for (key, feature_type) in [("nodes", "node"), ("platforms", "platform")] {
        for item in items(bundle, key) {
            let Some(loc) = Location::from_value(item.get("location")) else {
                continue;
            };
            if let Some(id) = item.get("id").and_then(Value::as_str) {
                located.insert(id.to_string(), loc);
            }
            let mut properties = shared_detail(item, bundle);
            properties.insert("id".to_string(), field(item, "id"));
            properties.insert("name".to_string(), field(item, "name"));
            properties.insert("type".to_string(), json!(feature_type));
            properties.insert(
                "role".to_string(),
                first_present(item, &["role", "mission_roles"])
                    .cloned()
                    .unwrap_or_else(|| json!([])),
            );
            features.push(json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": loc.coordinates()},
                "properties": properties,
            }));
        }
    }

    for link in items(bundle, "mesh_links") {
        let endpoint = |key: &str| {
            link.get(key)
                .and_then(Value::as_str)
                .and_then(|id| located.get(id))
        };
        let (Some(a), Some(b)) = (endpoint("from"), endpoint("to")) else {
            continue;
        };
        features.push(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[a.lon, a.lat], [b.lon, b.lat]]},
            "properties": {
                "id": field(link, "id"),
                "name": link.get("name").or_else(|| link.get("id")).cloned().unwrap_or(Value::Null),
                "type": "mesh_link",
                "origin_tool": link.get("origin_tool").cloned().unwrap_or_else(|| json!("mesh")),
                "rf_band_ghz": field(link, "rf_band_ghz"),
                "notes": field(link, "notes"),
            },
        }));
    }

    json!({"type": "FeatureCollection", "features": features})
}

/// CoT-like event list: platforms first, then nodes.
pub fn mission_project_to_cot(project: &Value) -> Value {
    let bundle = project_bundle(project);
    let mut events: Vec<Value> = Vec::new();

    for (key, type_code) in [("platforms", PLATFORM_COT_TYPE), ("nodes", NODE_COT_TYPE)] {
        for item in items(bundle, key) {
            let Some(loc) = Location::from_value(item.get("location")) else {
                continue;
            };
            let roles = first_present(item, &["mission_roles", "role"])
                .map(as_tags)
                .unwrap_or_default();
            let roles = if roles.is_empty() {
                "unspecified".to_string()
            } else {
                roles.join(", ")
            };
            let name = item.get("name").and_then(Value::as_str).unwrap_or("unnamed");
            events.push(json!({
                "id": field(item, "id"),
                "type": type_code,
                "how": "m-g",
                "remarks": format!("{name} ({roles})"),
                "point": {"lat": loc.lat, "lon": loc.lon, "hae": loc.elevation_m},
                "detail": shared_detail(item, bundle),
            }));
        }
    }

    json!({"events": events})
}
