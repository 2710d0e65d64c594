use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DosimetryError;

/// Cumulated activity (number of disintegrations, Bq·s) per source organ
///
/// Lookups are total: an organ without an entry has zero cumulated activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CumulatedActivity {
    values: BTreeMap<String, f64>,
}

impl CumulatedActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cumulated activity of `organ`, returning the previous value
    pub fn insert(&mut self, organ: impl Into<String>, activity: f64) -> Option<f64> {
        self.values.insert(organ.into(), activity)
    }

    pub fn with(mut self, organ: impl Into<String>, activity: f64) -> Self {
        self.insert(organ, activity);
        self
    }

    /// Cumulated activity of `organ`, `0.0` when absent
    pub fn get(&self, organ: &str) -> f64 {
        self.values.get(organ).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, organ: &str) -> bool {
        self.values.contains_key(organ)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that every value is finite and non-negative
    ///
    /// Returns [`DosimetryError::InvalidActivity`] for the first offending organ.
    pub fn validate(&self) -> Result<(), DosimetryError> {
        match self
            .values
            .iter()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            Some((organ, value)) => Err(DosimetryError::InvalidActivity {
                organ: organ.clone(),
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CumulatedActivity {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        CumulatedActivity {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CumulatedActivity {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
