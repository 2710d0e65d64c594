//! Time-activity integration primitives
//!
//! Cumulated activity is the area under the time-activity curve. These
//! functions work on raw `&[f64]` slices with the linear trapezoidal rule,
//! which is exact for a curve interpolated piecewise-linearly between samples.
//!
//! # Units
//!
//! Samples are given in hours and MBq. [`cumulated_activity`] converts both
//! before integrating and returns becquerel-seconds (number of
//! disintegrations).
//!
//! ```text
//! Ã = Σ (A₁ + A₂) / 2 × (t₂ − t₁)
//! ```
//!
//! # Example
//!
//! ```rust
//! use organdose::data::auc::{auc_linear, cumulated_activity};
//!
//! let times = [0.0, 1.0, 2.0, 4.0];
//! let activities = [0.0, 10.0, 8.0, 4.0];
//!
//! // (0+10)/2*1 + (10+8)/2*1 + (8+4)/2*2 = 5 + 9 + 12 = 26
//! assert!((auc_linear(&times, &activities) - 26.0).abs() < 1e-10);
//! assert!((cumulated_activity(&times, &activities) - 26.0 * 3600.0 * 1e6).abs() < 1e-3);
//! ```

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Becquerel per megabecquerel
pub const MBQ_TO_BQ: f64 = 1e6;

/// Linear trapezoidal area of one segment
///
/// Zero-width segments (repeated time points) contribute nothing.
#[inline]
pub fn auc_segment(t1: f64, a1: f64, t2: f64, a2: f64) -> f64 {
    (a1 + a2) / 2.0 * (t2 - t1)
}

/// Linear trapezoidal area over the whole profile
///
/// Profiles with fewer than two samples have zero area. The caller is
/// responsible for equal lengths and ordering; [`TimeActivitySeries`]
/// guarantees both.
///
/// [`TimeActivitySeries`]: crate::data::TimeActivitySeries
pub fn auc_linear(times: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(times.len(), values.len());
    times
        .windows(2)
        .zip(values.windows(2))
        .map(|(t, a)| auc_segment(t[0], a[0], t[1], a[1]))
        .sum()
}

/// Cumulated activity in Bq·s from samples in hours and MBq
pub fn cumulated_activity(times_hours: &[f64], activities_mbq: &[f64]) -> f64 {
    let times: Vec<f64> = times_hours.iter().map(|t| t * SECONDS_PER_HOUR).collect();
    let activities: Vec<f64> = activities_mbq.iter().map(|a| a * MBQ_TO_BQ).collect();
    auc_linear(&times, &activities)
}
