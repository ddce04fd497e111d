//! Component resolution against a catalog.
//!
//! Lookups are a linear scan over the category list. Catalogs hold tens of
//! entries and are loaded fresh per invocation, so no index is built.

use crate::catalog::{Battery, Catalog, CatalogEntry, Compute, Frame, Payload, Propulsion, Radio};
use crate::design::ComponentSelection;
use crate::error::CatalogError;
use log::debug;

impl Catalog {
    /// Resolve one record by id within its category.
    pub fn lookup<T: CatalogEntry>(&self, id: &str) -> Result<&T, CatalogError> {
        self.records::<T>()?
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| CatalogError::not_found(T::CATEGORY.as_str(), id))
    }
}

/// Concrete records for every id in a `ComponentSelection`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedComponents<'a> {
    pub frame: &'a Frame,
    pub propulsion: &'a Propulsion,
    pub battery: &'a Battery,
    pub compute: &'a Compute,
    pub radio: &'a Radio,
    /// One entry per selected payload id, duplicates included.
    pub payloads: Vec<&'a Payload>,
}

/// Resolve the five singular categories plus every payload id.
///
/// The first missing id aborts resolution; there are no partial results.
/// Mounted node ids are traceability only and are never looked up.
pub fn resolve_selection<'a>(
    catalog: &'a Catalog,
    selection: &ComponentSelection,
) -> Result<ResolvedComponents<'a>, CatalogError> {
    let frame = catalog.lookup::<Frame>(&selection.frame)?;
    let propulsion = catalog.lookup::<Propulsion>(&selection.propulsion)?;
    let battery = catalog.lookup::<Battery>(&selection.battery)?;
    let compute = catalog.lookup::<Compute>(&selection.compute)?;
    let radio = catalog.lookup::<Radio>(&selection.radio)?;
    let payloads = selection
        .payloads
        .iter()
        .map(|id| catalog.lookup::<Payload>(id))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "resolved frame {} with {} payload(s)",
        frame.id,
        payloads.len()
    );

    Ok(ResolvedComponents {
        frame,
        propulsion,
        battery,
        compute,
        radio,
        payloads,
    })
}
