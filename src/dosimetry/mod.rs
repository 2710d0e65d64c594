//! Organ dose calculation
//!
//! [`DoseCalculator`] turns activity data into absorbed dose per target organ
//! using the S-value tables of an [`SValueProvider`](crate::svalues::SValueProvider).
//!
//! ```text
//! time-activity table ──integrate──▶ cumulated activity ──S-values──▶ dose per target
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use organdose::prelude::*;
//!
//! let provider = Arc::new(SValueProvider::from_dir("svalues"));
//! let calculator = DoseCalculator::new(provider);
//!
//! let table = read_time_activity("input_data.csv", calculator.taxonomy()).unwrap();
//! let doses = calculator.compute_from_series(&table, "Lu177").unwrap();
//! println!("{}", doses);
//! ```

mod calculator;
mod result;


pub use calculator::{DoseCalculator, MGY_TO_GY};
pub use result::{DoseResult, OrganDose};
