//! Supported radionuclides
//!
//! The physical half-life is carried for reporting and unit context only. Dose
//! calculation works on observed activity and never applies a decay model.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::data::auc::SECONDS_PER_HOUR;
use crate::error::DosimetryError;

/// Built-in radionuclides with their half-lives in hours
pub const RADIONUCLIDES: [(&str, f64); 8] = [
    ("F18", 1.83),
    ("Ga68", 1.13),
    ("Cu64", 12.7),
    ("Zr89", 78.41),
    ("I131", 192.48),
    ("Lu177", 159.6),
    ("Ac225", 240.0),
    ("Pb212", 10.64),
];

lazy_static! {
    /// Shared registry of the built-in radionuclides
    pub static ref DEFAULT_REGISTRY: Arc<RadionuclideRegistry> =
        Arc::new(RadionuclideRegistry::default());
}

/// A radionuclide identifier and its physical half-life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radionuclide {
    id: String,
    half_life_hours: f64,
}

impl Radionuclide {
    pub fn new(id: impl Into<String>, half_life_hours: f64) -> Self {
        Radionuclide {
            id: id.into(),
            half_life_hours,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn half_life_hours(&self) -> f64 {
        self.half_life_hours
    }

    pub fn half_life_seconds(&self) -> f64 {
        self.half_life_hours * SECONDS_PER_HOUR
    }

    /// Physical decay constant λ = ln(2) / T½, per hour
    pub fn decay_constant(&self) -> f64 {
        std::f64::consts::LN_2 / self.half_life_hours
    }
}

impl fmt::Display for Radionuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (T½ = {} h)", self.id, self.half_life_hours)
    }
}

/// The set of radionuclides a provider accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadionuclideRegistry {
    nuclides: BTreeMap<String, Radionuclide>,
}

impl RadionuclideRegistry {
    pub fn new(nuclides: impl IntoIterator<Item = Radionuclide>) -> Self {
        let nuclides = nuclides
            .into_iter()
            .map(|n| (n.id.clone(), n))
            .collect();
        RadionuclideRegistry { nuclides }
    }

    /// Look up `id`, failing with [`DosimetryError::UnsupportedRadionuclide`]
    pub fn get(&self, id: &str) -> Result<&Radionuclide, DosimetryError> {
        self.nuclides
            .get(id)
            .ok_or_else(|| DosimetryError::unsupported(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nuclides.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nuclides.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Radionuclide> {
        self.nuclides.values()
    }

    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }
}

impl Default for RadionuclideRegistry {
    fn default() -> Self {
        Self::new(
            RADIONUCLIDES
                .iter()
                .map(|&(id, half_life)| Radionuclide::new(id, half_life)),
        )
    }
}
