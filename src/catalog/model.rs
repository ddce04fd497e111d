//! Typed catalog records.
//!
//! A catalog is six independent lists keyed by category name. Each list is
//! optional in the document; asking for a category the document does not carry
//! is an error rather than an empty result.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Frames,
    Propulsion,
    Batteries,
    Compute,
    Radios,
    Payloads,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Frames,
        Category::Propulsion,
        Category::Batteries,
        Category::Compute,
        Category::Radios,
        Category::Payloads,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frames => "frames",
            Category::Propulsion => "propulsion",
            Category::Batteries => "batteries",
            Category::Compute => "compute",
            Category::Radios => "radios",
            Category::Payloads => "payloads",
        }
    }

    pub fn names() -> [&'static str; 6] {
        Category::ALL.map(|category| category.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| CatalogError::UnknownCategory {
                category: value.to_string(),
            })
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::try_from(s)
    }
}

/// Airframe or chassis. `type == "ground"` switches the power model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub frame_type: String,
    pub empty_mass_kg: f64,
    pub max_payload_kg: f64,
    pub max_takeoff_kg: f64,
    #[serde(default)]
    pub role_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Frame {
    pub fn is_ground(&self) -> bool {
        self.frame_type == GROUND_FRAME_TYPE
    }
}

pub const GROUND_FRAME_TYPE: &str = "ground";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Propulsion {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    pub thrust_kg: f64,
    pub hover_power_w: f64,
    /// Frame ids this set is rated for. Empty means nobody recorded it.
    #[serde(default)]
    pub compatible_frames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    pub capacity_wh: f64,
    pub continuous_discharge_w: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compute {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    pub power_w: f64,
    #[serde(default)]
    pub ai_tops: f64,
    #[serde(default)]
    pub role_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Radio {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    pub power_w: f64,
    #[serde(default)]
    pub range_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rf_band_ghz: Option<f64>,
    #[serde(default)]
    pub role_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    #[serde(default)]
    pub power_w: f64,
    #[serde(default)]
    pub role_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The full component catalog, loaded once and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propulsion: Option<Vec<Propulsion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batteries: Option<Vec<Battery>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Vec<Compute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radios: Option<Vec<Radio>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payloads: Option<Vec<Payload>>,
}

/// A record type that lives in exactly one catalog category.
pub trait CatalogEntry: Sized {
    const CATEGORY: Category;

    fn id(&self) -> &str;

    fn entries(catalog: &Catalog) -> Option<&[Self]>;
}

impl CatalogEntry for Frame {
    const CATEGORY: Category = Category::Frames;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.frames.as_deref()
    }
}

impl CatalogEntry for Propulsion {
    const CATEGORY: Category = Category::Propulsion;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.propulsion.as_deref()
    }
}

impl CatalogEntry for Battery {
    const CATEGORY: Category = Category::Batteries;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.batteries.as_deref()
    }
}

impl CatalogEntry for Compute {
    const CATEGORY: Category = Category::Compute;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.compute.as_deref()
    }
}

impl CatalogEntry for Radio {
    const CATEGORY: Category = Category::Radios;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.radios.as_deref()
    }
}

impl CatalogEntry for Payload {
    const CATEGORY: Category = Category::Payloads;

    fn id(&self) -> &str {
        &self.id
    }

    fn entries(catalog: &Catalog) -> Option<&[Self]> {
        catalog.payloads.as_deref()
    }
}

impl Catalog {
    /// All records of one category, in document order.
    pub fn records<T: CatalogEntry>(&self) -> Result<&[T], CatalogError> {
        T::entries(self).ok_or_else(|| CatalogError::MissingCategory {
            category: T::CATEGORY.as_str().to_string(),
        })
    }

    /// Whether the document carries the category at all.
    pub fn has_category(&self, category: Category) -> bool {
        match category {
            Category::Frames => self.frames.is_some(),
            Category::Propulsion => self.propulsion.is_some(),
            Category::Batteries => self.batteries.is_some(),
            Category::Compute => self.compute.is_some(),
            Category::Radios => self.radios.is_some(),
            Category::Payloads => self.payloads.is_some(),
        }
    }

    /// Number of records per category present in the document.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let len = match category {
                    Category::Frames => self.frames.as_ref().map(Vec::len),
                    Category::Propulsion => self.propulsion.as_ref().map(Vec::len),
                    Category::Batteries => self.batteries.as_ref().map(Vec::len),
                    Category::Compute => self.compute.as_ref().map(Vec::len),
                    Category::Radios => self.radios.as_ref().map(Vec::len),
                    Category::Payloads => self.payloads.as_ref().map(Vec::len),
                }?;
                Some((category, len))
            })
            .collect()
    }
}
