//! S-value (dose-conversion coefficient) tables
//!
//! An S-value table gives, for one radionuclide, the absorbed dose in a target
//! organ per unit cumulated activity in a source organ (mGy/(MBq·s)).
//!
//! - [`RawTable`]: labelled cells as read from CSV
//! - [`CoefficientTable`]: validated, taxonomy-ordered matrix
//! - [`SValueSource`]: storage seam ([`DirectorySource`], [`InMemorySource`])
//! - [`SValueProvider`]: registry check, validation and per-radionuclide cache
//! - [`verify`]: non-failing integrity report over all radionuclides
//!
//! # File format
//!
//! ```text
//! Target,Adrenals,Brain,...,Total Body
//! Adrenals,3.1e-2,1.2e-7,...,1.4e-5
//! ...
//! ```

mod provider;
mod source;
mod table;
pub mod verify;

pub use provider::SValueProvider;
pub use source::{DirectorySource, InMemorySource, SValueSource};
pub use table::{CoefficientTable, RawTable};
pub use verify::{verify_directory, verify_source, TableReport};
