//! Organ-level internal dosimetry following the OLINDA / ICRP 89 formalism.
//!
//! Given time-activity measurements or cumulated activities per source organ
//! and a radionuclide's S-value table, compute the absorbed dose (Gy) to each
//! target organ.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use organdose::prelude::*;
//!
//! // A toy taxonomy: one solid organ and one hollow organ.
//! let taxonomy = Arc::new(
//!     OrganTaxonomy::new(
//!         ["Liver", "Gut Contents"],
//!         ["Liver", "Gut Wall"],
//!         [("Gut Wall", "Gut Contents")],
//!     )
//!     .unwrap(),
//! );
//! let source = InMemorySource::new()
//!     .with_table("F18", "Target,Liver,Gut Contents\nLiver,2.0,0.5\nGut Wall,0.1,4.0\n");
//! let provider = SValueProvider::new(source).with_taxonomy(taxonomy);
//! let calculator = DoseCalculator::new(Arc::new(provider));
//!
//! let activity = CumulatedActivity::new().with("Liver", 1000.0);
//! let doses = calculator.compute_from_cumulated(&activity, "F18").unwrap();
//! assert!((doses.get("Liver").unwrap() - 2.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod data;
pub mod dosimetry;
pub mod error;
pub mod logging;
pub mod svalues;

pub use config::DosimetryConfig;
pub use dosimetry::{DoseCalculator, DoseResult};
pub use error::DosimetryError;
pub use svalues::SValueProvider;

pub mod prelude {
    pub use crate::config::DosimetryConfig;
    pub use crate::data::parser::{read_time_activity, read_time_activity_reader};
    pub use crate::data::{
        CumulatedActivity, OrganInput, OrganTaxonomy, Radionuclide, RadionuclideRegistry,
        TimeActivitySeries, TimeActivityTable, ICRP89,
    };
    pub use crate::dosimetry::{DoseCalculator, DoseResult, OrganDose};
    pub use crate::error::{DosimetryError, SchemaIssue, SeriesError};
    pub use crate::svalues::{
        CoefficientTable, DirectorySource, InMemorySource, SValueProvider, SValueSource,
    };
}
