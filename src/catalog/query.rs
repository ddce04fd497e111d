//! Read-only listing and role search over a catalog.

use crate::catalog::{Battery, Catalog, Category, Compute, Frame, Payload, Propulsion, Radio};
use crate::error::CatalogError;
use serde::Serialize;
use serde_json::Value;

/// Records of one category as JSON rows, in catalog order.
///
/// Rows keep the document field names so table rendering can pick columns by
/// key presence.
pub fn list_category(catalog: &Catalog, category: Category) -> Result<Vec<Value>, CatalogError> {
    match category {
        Category::Frames => Ok(rows(catalog.records::<Frame>()?)),
        Category::Propulsion => Ok(rows(catalog.records::<Propulsion>()?)),
        Category::Batteries => Ok(rows(catalog.records::<Battery>()?)),
        Category::Compute => Ok(rows(catalog.records::<Compute>()?)),
        Category::Radios => Ok(rows(catalog.records::<Radio>()?)),
        Category::Payloads => Ok(rows(catalog.records::<Payload>()?)),
    }
}

/// Like `list_category`, but takes the category by name.
pub fn list_category_named(catalog: &Catalog, category: &str) -> Result<Vec<Value>, CatalogError> {
    list_category(catalog, Category::try_from(category)?)
}

/// Payloads carrying `role` in their role tags.
///
/// A catalog without a payload category simply has no matches.
pub fn recommended_roles<'a>(catalog: &'a Catalog, role: &str) -> Vec<&'a Payload> {
    catalog
        .payloads
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|payload| payload.role_tags.iter().any(|tag| tag == role))
        .collect()
}

fn rows<T: Serialize>(records: &[T]) -> Vec<Value> {
    // Derived Serialize on plain structs cannot fail; Null keeps the row count.
    records
        .iter()
        .map(|record| serde_json::to_value(record).unwrap_or(Value::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::sample_catalog;

    #[test]
    fn list_keeps_catalog_order_and_fields() {
        let catalog = sample_catalog();
        let rows = list_category(&catalog, Category::Frames).unwrap();
        let ids: Vec<_> = rows
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_str))
            .collect();
        assert_eq!(ids, vec!["quad-x", "rover-g"]);
        assert_eq!(rows[1].get("type").and_then(Value::as_str), Some("ground"));
    }

    #[test]
    fn list_by_unknown_name_fails() {
        let catalog = sample_catalog();
        let err = list_category_named(&catalog, "hulls").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));
    }

    #[test]
    fn roles_match_payload_tags_only() {
        let catalog = sample_catalog();
        let ids: Vec<_> = recommended_roles(&catalog, "isr")
            .into_iter()
            .map(|payload| payload.id.as_str())
            .collect();
        assert_eq!(ids, vec!["eo-cam", "sigint-pod"]);
        // "recon" only appears on a frame.
        assert!(recommended_roles(&catalog, "recon").is_empty());
        assert!(recommended_roles(&Catalog::default(), "isr").is_empty());
    }
}
