//! Component catalog wiring.
//!
//! This module wraps the catalog document on disk (by default
//! `data/catalog.json`) so the evaluator can work against typed records.
//! `model` mirrors the document fields, `loader` validates and parses files,
//! `resolve` turns a selection of ids into records, and `query` serves the
//! listing and role-search commands.

pub mod loader;
pub mod model;
pub mod query;
pub mod resolve;

pub use loader::{catalog_from_value, load_catalog_from_path, validate_catalog_value};
pub use model::{
    Battery, Catalog, CatalogEntry, Category, Compute, Frame, GROUND_FRAME_TYPE, Payload,
    Propulsion, Radio,
};
pub use query::{list_category, list_category_named, recommended_roles};
pub use resolve::{ResolvedComponents, resolve_selection};

/// Default relative path to the bundled component catalog.
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
