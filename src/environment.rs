//! Environment bands and their correction coefficients.
//!
//! Two independent fixed tables: altitude bands derate thrust and add a power
//! penalty, temperature bands derate usable battery capacity. Band names are
//! advisory input, so an unknown name falls back to the identity band
//! (`sea_level` / `standard`) instead of failing.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AltitudeBand {
    #[default]
    SeaLevel,
    HighDesert,
    Mountain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemperatureBand {
    Hot,
    #[default]
    Standard,
    Cold,
    Freezing,
}

/// Coefficients for one altitude band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltitudeProfile {
    pub band: AltitudeBand,
    pub label: &'static str,
    /// Fraction of rated thrust available, in (0, 1].
    pub thrust_efficiency: f64,
    /// Extra power draw as a fraction of the nominal budget.
    pub power_penalty: f64,
}

/// Coefficients for one temperature band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureProfile {
    pub band: TemperatureBand,
    pub label: &'static str,
    /// Fraction of usable battery capacity, in (0, 1].
    pub capacity_factor: f64,
}

const ALTITUDE_BANDS: &[AltitudeProfile] = &[
    AltitudeProfile {
        band: AltitudeBand::SeaLevel,
        label: "Sea level (0-500 m)",
        thrust_efficiency: 1.0,
        power_penalty: 0.0,
    },
    AltitudeProfile {
        band: AltitudeBand::HighDesert,
        label: "High desert (~1500 m)",
        thrust_efficiency: 0.9,
        power_penalty: 0.08,
    },
    AltitudeProfile {
        band: AltitudeBand::Mountain,
        label: "Mountain (~3000 m)",
        thrust_efficiency: 0.8,
        power_penalty: 0.15,
    },
];

const TEMPERATURE_BANDS: &[TemperatureProfile] = &[
    TemperatureProfile {
        band: TemperatureBand::Hot,
        label: "Hot (>35 C)",
        capacity_factor: 0.95,
    },
    TemperatureProfile {
        band: TemperatureBand::Standard,
        label: "Standard (10-35 C)",
        capacity_factor: 1.0,
    },
    TemperatureProfile {
        band: TemperatureBand::Cold,
        label: "Cold (0-10 C)",
        capacity_factor: 0.85,
    },
    TemperatureProfile {
        band: TemperatureBand::Freezing,
        label: "Freezing (<0 C)",
        capacity_factor: 0.7,
    },
];

impl AltitudeBand {
    pub const ALL: [AltitudeBand; 3] = [
        AltitudeBand::SeaLevel,
        AltitudeBand::HighDesert,
        AltitudeBand::Mountain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeBand::SeaLevel => "sea_level",
            AltitudeBand::HighDesert => "high_desert",
            AltitudeBand::Mountain => "mountain",
        }
    }

    pub fn names() -> [&'static str; 3] {
        AltitudeBand::ALL.map(|band| band.as_str())
    }

    /// Exact lookup; `None` for names outside the table.
    pub fn parse(name: &str) -> Option<Self> {
        AltitudeBand::ALL
            .into_iter()
            .find(|band| band.as_str() == name)
    }

    /// Lenient lookup used for evaluation input.
    pub fn from_name(name: &str) -> Self {
        AltitudeBand::parse(name).unwrap_or_else(|| {
            warn!("unknown altitude band '{name}', using sea_level");
            AltitudeBand::default()
        })
    }

    pub fn profile(&self) -> &'static AltitudeProfile {
        ALTITUDE_BANDS
            .iter()
            .find(|profile| profile.band == *self)
            .unwrap_or(&ALTITUDE_BANDS[0])
    }
}

impl TemperatureBand {
    pub const ALL: [TemperatureBand; 4] = [
        TemperatureBand::Hot,
        TemperatureBand::Standard,
        TemperatureBand::Cold,
        TemperatureBand::Freezing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Hot => "hot",
            TemperatureBand::Standard => "standard",
            TemperatureBand::Cold => "cold",
            TemperatureBand::Freezing => "freezing",
        }
    }

    pub fn names() -> [&'static str; 4] {
        TemperatureBand::ALL.map(|band| band.as_str())
    }

    pub fn parse(name: &str) -> Option<Self> {
        TemperatureBand::ALL
            .into_iter()
            .find(|band| band.as_str() == name)
    }

    pub fn from_name(name: &str) -> Self {
        TemperatureBand::parse(name).unwrap_or_else(|| {
            warn!("unknown temperature band '{name}', using standard");
            TemperatureBand::default()
        })
    }

    pub fn profile(&self) -> &'static TemperatureProfile {
        TEMPERATURE_BANDS
            .iter()
            .find(|profile| profile.band == *self)
            .unwrap_or(&TEMPERATURE_BANDS[1])
    }
}

impl From<String> for AltitudeBand {
    fn from(value: String) -> Self {
        AltitudeBand::from_name(&value)
    }
}

impl From<AltitudeBand> for String {
    fn from(value: AltitudeBand) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for TemperatureBand {
    fn from(value: String) -> Self {
        TemperatureBand::from_name(&value)
    }
}

impl From<TemperatureBand> for String {
    fn from(value: TemperatureBand) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AltitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating environment a design is evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub altitude_band: AltitudeBand,
    #[serde(default)]
    pub temperature_band: TemperatureBand,
}

impl Environment {
    pub fn new(altitude_band: AltitudeBand, temperature_band: TemperatureBand) -> Self {
        Self {
            altitude_band,
            temperature_band,
        }
    }

    /// Build from band names, normalizing unknown names to the defaults.
    pub fn from_names(altitude_band: &str, temperature_band: &str) -> Self {
        Self::new(
            AltitudeBand::from_name(altitude_band),
            TemperatureBand::from_name(temperature_band),
        )
    }

    pub fn altitude(&self) -> &'static AltitudeProfile {
        self.altitude_band.profile()
    }

    pub fn temperature(&self) -> &'static TemperatureProfile {
        self.temperature_band.profile()
    }
}
