//! Error taxonomy for catalog resolution.
//!
//! Only resolution failures are errors. Domain problems (overload, margins,
//! discharge limits, operator constraints) are reported as warnings on the
//! `DesignResult`, and unknown environment bands fall back to defaults.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The category name is not one of the six catalog categories.
    #[error("Unknown category: {category}")]
    UnknownCategory { category: String },

    /// The catalog document does not carry the requested category at all.
    #[error("catalog has no '{category}' category")]
    MissingCategory { category: String },

    /// No record with this id exists in the category.
    #[error("{category} component '{id}' not found")]
    ComponentNotFound { category: String, id: String },
}

impl CatalogError {
    pub fn not_found(category: &str, id: &str) -> Self {
        CatalogError::ComponentNotFound {
            category: category.to_string(),
            id: id.to_string(),
        }
    }

    /// Category named by the error, whichever variant it is.
    pub fn category(&self) -> &str {
        match self {
            CatalogError::UnknownCategory { category }
            | CatalogError::MissingCategory { category }
            | CatalogError::ComponentNotFound { category, .. } => category,
        }
    }
}
