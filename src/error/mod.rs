//! Error types for dose calculation
//!
//! [`DosimetryError`] is the single error surfaced by the provider and the dose
//! engine. Each variant names the radionuclide or organ that caused it so the
//! caller can report the problem without inspecting the input again.

use std::fmt;

use thiserror::Error;

use crate::data::parser::ParseError;

/// Errors that can occur while loading coefficient tables or computing doses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DosimetryError {
    /// The identifier is not part of the radionuclide registry
    #[error("Unsupported radionuclide: {id}")]
    UnsupportedRadionuclide { id: String },

    /// No coefficient data could be located for a supported radionuclide
    #[error("S-value data for {radionuclide} not found: {location}")]
    SourceNotFound {
        radionuclide: String,
        location: String,
    },

    /// The coefficient table does not cover the organ taxonomy
    #[error("Invalid S-value table for {radionuclide}: {issue}")]
    SchemaViolation {
        radionuclide: String,
        issue: SchemaIssue,
    },

    /// A coefficient is negative or not finite
    #[error("Invalid S-value for {radionuclide} at ({target}, {source_organ}): {value}")]
    DataIntegrity {
        radionuclide: String,
        target: String,
        source_organ: String,
        value: f64,
    },

    /// A time-activity series violates its invariants
    #[error("Invalid time-activity series for {organ}: {reason}")]
    InvalidSeries { organ: String, reason: SeriesError },

    /// A cumulated activity value is negative, not finite or given twice
    #[error("Invalid cumulated activity for {organ}: {value}")]
    InvalidActivity { organ: String, value: f64 },

    /// A collaborator failed to parse its input
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A result could not be written
    #[error("Output error: {0}")]
    Output(String),
}

/// What is missing from a coefficient table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    /// Source organ columns and/or target organ rows are absent
    MissingOrgans {
        sources: Vec<String>,
        targets: Vec<String>,
    },
    /// The cell linking a wall target to its contents source is absent
    MissingWallContentsPair { wall: String, contents: String },
    /// Some other required cell is empty
    MissingCell { target: String, source: String },
    /// A row label appears more than once
    DuplicateRow(String),
    /// A column label appears more than once
    DuplicateColumn(String),
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::MissingOrgans { sources, targets } => write!(
                f,
                "missing source organs {:?}, missing target organs {:?}",
                sources, targets
            ),
            SchemaIssue::MissingWallContentsPair { wall, contents } => write!(
                f,
                "missing wall-contents pair (wall: {}, contents: {})",
                wall, contents
            ),
            SchemaIssue::MissingCell { target, source } => {
                write!(f, "missing value for target {} from source {}", target, source)
            }
            SchemaIssue::DuplicateRow(label) => write!(f, "duplicate target row {}", label),
            SchemaIssue::DuplicateColumn(label) => {
                write!(f, "duplicate source column {}", label)
            }
        }
    }
}

/// Reasons a time-activity series is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// `times` and `activities` differ in length
    #[error("length mismatch: {times} times, {activities} activities")]
    LengthMismatch { times: usize, activities: usize },

    /// A time point precedes the one before it
    #[error("time {time} at index {index} is earlier than the previous sample")]
    NonAscendingTime { index: usize, time: f64 },

    /// A time is negative or not finite
    #[error("invalid time {time} at index {index}")]
    InvalidTime { index: usize, time: f64 },

    /// An activity is negative or not finite
    #[error("invalid activity {activity} at index {index}")]
    InvalidActivity { index: usize, activity: f64 },
}

impl DosimetryError {
    pub(crate) fn unsupported(id: impl Into<String>) -> Self {
        Self::UnsupportedRadionuclide { id: id.into() }
    }

    pub(crate) fn schema(radionuclide: impl Into<String>, issue: SchemaIssue) -> Self {
        Self::SchemaViolation {
            radionuclide: radionuclide.into(),
            issue,
        }
    }

    pub(crate) fn series(organ: impl Into<String>, reason: SeriesError) -> Self {
        Self::InvalidSeries {
            organ: organ.into(),
            reason,
        }
    }
}
