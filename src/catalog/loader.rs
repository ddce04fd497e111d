//! Catalog loading and validation.
//!
//! Documents are checked against the bundled JSON Schema first so shape
//! problems surface with a JSON pointer, then deserialized into typed records.
//! Duplicate ids within a category are rejected; a lookup by id must be
//! unambiguous.

use crate::catalog::{Catalog, Category};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use log::debug;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const CATALOG_SCHEMA: &str = include_str!("../../schema/catalog.schema.json");

/// Read, validate, and deserialize a catalog document.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    if !path.is_file() {
        bail!("Catalog not found: {}", path.display());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    let catalog =
        catalog_from_value(value).with_context(|| format!("loading {}", path.display()))?;
    debug!(
        "loaded catalog {} ({} categories)",
        path.display(),
        catalog.counts().len()
    );
    Ok(catalog)
}

/// Validate an in-memory catalog document and convert it to typed records.
pub fn catalog_from_value(value: Value) -> Result<Catalog> {
    validate_catalog_value(&value)?;
    serde_json::from_value(value).context("catalog records do not match the expected fields")
}

/// Schema check plus duplicate-id check, without building records.
pub fn validate_catalog_value(value: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(CATALOG_SCHEMA).context("parsing bundled catalog schema")?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling bundled catalog schema: {err}"))?;
    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("catalog failed schema validation:\n{}", details);
    }

    for category in Category::ALL {
        let Some(records) = value.get(category.as_str()).and_then(Value::as_array) else {
            continue;
        };
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for record in records {
            let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
            if id.trim().is_empty() {
                bail!("{} contains a record with no id", category);
            }
            if !seen.insert(id) {
                bail!("duplicate {} id {}", category, id);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_catalog() {
        let catalog = catalog_from_value(json!({
            "frames": [{
                "id": "f", "name": "F", "type": "quad",
                "empty_mass_kg": 1.0, "max_payload_kg": 1.0, "max_takeoff_kg": 3.0
            }],
            "payloads": []
        }))
        .unwrap();
        assert_eq!(catalog.frames.as_ref().map(Vec::len), Some(1));
        assert!(catalog.batteries.is_none());
    }

    #[test]
    fn rejects_negative_mass() {
        let err = validate_catalog_value(&json!({
            "payloads": [{"id": "p", "name": "P", "mass_kg": -0.1}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("schema validation"));
    }

    #[test]
    fn rejects_duplicate_ids_within_category() {
        let err = validate_catalog_value(&json!({
            "payloads": [
                {"id": "p", "name": "P", "mass_kg": 0.1},
                {"id": "p", "name": "P2", "mass_kg": 0.2}
            ]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate payloads id p");
    }

    #[test]
    fn same_id_in_different_categories_is_fine() {
        validate_catalog_value(&json!({
            "compute": [{"id": "node-1", "name": "N", "mass_kg": 0.1, "power_w": 4}],
            "radios": [{"id": "node-1", "name": "N", "mass_kg": 0.1, "power_w": 4}]
        }))
        .unwrap();
    }
}
