use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::auc;
use crate::error::{DosimetryError, SeriesError};

/// Time-activity samples for one source organ
///
/// Times are in hours, activities in MBq. The constructor enforces the
/// invariants, so a [`TimeActivitySeries`] always has equal-length, finite,
/// non-negative samples with non-decreasing times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeActivitySeries {
    organ: String,
    times: Vec<f64>,
    activities: Vec<f64>,
}

impl TimeActivitySeries {
    pub fn new(
        organ: impl Into<String>,
        times: Vec<f64>,
        activities: Vec<f64>,
    ) -> Result<Self, DosimetryError> {
        let organ = organ.into();
        if let Err(reason) = check_samples(&times, &activities) {
            return Err(DosimetryError::series(organ, reason));
        }
        Ok(TimeActivitySeries {
            organ,
            times,
            activities,
        })
    }

    /// Build from `(time, activity)` pairs
    pub fn from_samples(
        organ: impl Into<String>,
        samples: &[(f64, f64)],
    ) -> Result<Self, DosimetryError> {
        let (times, activities) = samples.iter().copied().unzip();
        Self::new(organ, times, activities)
    }

    pub fn organ(&self) -> &str {
        &self.organ
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn activities(&self) -> &[f64] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Cumulated activity over the observed interval, in Bq·s
    pub fn cumulated_activity(&self) -> f64 {
        auc::cumulated_activity(&self.times, &self.activities)
    }
}

impl<'de> Deserialize<'de> for TimeActivitySeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            organ: String,
            times: Vec<f64>,
            activities: Vec<f64>,
        }
        let raw = Raw::deserialize(deserializer)?;
        TimeActivitySeries::new(raw.organ, raw.times, raw.activities)
            .map_err(serde::de::Error::custom)
    }
}

fn check_samples(times: &[f64], activities: &[f64]) -> Result<(), SeriesError> {
    if times.len() != activities.len() {
        return Err(SeriesError::LengthMismatch {
            times: times.len(),
            activities: activities.len(),
        });
    }
    for (index, &time) in times.iter().enumerate() {
        if !time.is_finite() || time < 0.0 {
            return Err(SeriesError::InvalidTime { index, time });
        }
        if index > 0 && time < times[index - 1] {
            return Err(SeriesError::NonAscendingTime { index, time });
        }
    }
    for (index, &activity) in activities.iter().enumerate() {
        if !activity.is_finite() || activity < 0.0 {
            return Err(SeriesError::InvalidActivity { index, activity });
        }
    }
    Ok(())
}

/// Time-activity series for a set of source organs
///
/// Organs without a series are treated as carrying no activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeActivityTable {
    series: BTreeMap<String, TimeActivitySeries>,
}

impl TimeActivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a shared time column and one activity column per organ
    pub fn from_columns<S: Into<String>>(
        times: &[f64],
        columns: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Result<Self, DosimetryError> {
        let mut table = Self::new();
        for (organ, activities) in columns {
            table.insert(TimeActivitySeries::new(organ, times.to_vec(), activities)?);
        }
        Ok(table)
    }

    /// Add a series, replacing any previous series for the same organ
    pub fn insert(&mut self, series: TimeActivitySeries) -> Option<TimeActivitySeries> {
        self.series.insert(series.organ.clone(), series)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_series(mut self, series: TimeActivitySeries) -> Self {
        self.insert(series);
        self
    }

    pub fn get(&self, organ: &str) -> Option<&TimeActivitySeries> {
        self.series.get(organ)
    }

    pub fn organs(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, TimeActivitySeries> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<TimeActivitySeries> for TimeActivityTable {
    fn from_iter<I: IntoIterator<Item = TimeActivitySeries>>(iter: I) -> Self {
        let mut table = Self::new();
        for series in iter {
            table.insert(series);
        }
        table
    }
}

impl<'a> IntoIterator for &'a TimeActivityTable {
    type Item = &'a TimeActivitySeries;
    type IntoIter = btree_map::Values<'a, String, TimeActivitySeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Activity information for one source organ
///
/// Either a measured time-activity curve to be integrated, or a cumulated
/// activity (Bq·s) computed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrganInput {
    Series(TimeActivitySeries),
    Cumulated { organ: String, activity: f64 },
}

impl OrganInput {
    pub fn cumulated(organ: impl Into<String>, activity: f64) -> Self {
        OrganInput::Cumulated {
            organ: organ.into(),
            activity,
        }
    }

    pub fn organ(&self) -> &str {
        match self {
            OrganInput::Series(series) => series.organ(),
            OrganInput::Cumulated { organ, .. } => organ,
        }
    }

    /// Cumulated activity in Bq·s, integrating when needed
    pub fn cumulated_activity(&self) -> f64 {
        match self {
            OrganInput::Series(series) => series.cumulated_activity(),
            OrganInput::Cumulated { activity, .. } => *activity,
        }
    }
}

impl From<TimeActivitySeries> for OrganInput {
    fn from(series: TimeActivitySeries) -> Self {
        OrganInput::Series(series)
    }
}
