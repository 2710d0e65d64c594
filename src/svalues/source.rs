use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::parser::ParseError;
use crate::data::Radionuclide;
use crate::error::DosimetryError;
use crate::svalues::RawTable;

/// Storage holding the S-value table of each radionuclide
///
/// This is the only place the provider performs I/O.
pub trait SValueSource: Send + Sync {
    /// Read the raw table for `radionuclide`
    ///
    /// Returns [`DosimetryError::SourceNotFound`] when no data exists and
    /// [`ParseError::Io`] when it exists but cannot be read.
    fn load(&self, radionuclide: &Radionuclide) -> Result<RawTable, DosimetryError>;

    /// Human-readable location of the data, for logging
    fn describe(&self, radionuclide: &Radionuclide) -> String;
}

impl<T: SValueSource + ?Sized> SValueSource for Arc<T> {
    fn load(&self, radionuclide: &Radionuclide) -> Result<RawTable, DosimetryError> {
        (**self).load(radionuclide)
    }

    fn describe(&self, radionuclide: &Radionuclide) -> String {
        (**self).describe(radionuclide)
    }
}

/// Reads `<dir>/<ID>.csv`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, radionuclide: &Radionuclide) -> PathBuf {
        self.dir.join(format!("{}.csv", radionuclide.id()))
    }
}

impl SValueSource for DirectorySource {
    fn load(&self, radionuclide: &Radionuclide) -> Result<RawTable, DosimetryError> {
        let path = self.path_for(radionuclide);
        let file = std::fs::File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DosimetryError::SourceNotFound {
                radionuclide: radionuclide.id().to_string(),
                location: path.display().to_string(),
            },
            _ => ParseError::io(&path, &e).into(),
        })?;
        Ok(RawTable::from_reader(file)?)
    }

    fn describe(&self, radionuclide: &Radionuclide) -> String {
        self.path_for(radionuclide).display().to_string()
    }
}

/// CSV text held in memory, keyed by radionuclide identifier
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, radionuclide: impl Into<String>, csv: impl Into<String>) {
        self.tables.insert(radionuclide.into(), csv.into());
    }

    pub fn with_table(mut self, radionuclide: impl Into<String>, csv: impl Into<String>) -> Self {
        self.insert(radionuclide, csv);
        self
    }
}

impl SValueSource for InMemorySource {
    fn load(&self, radionuclide: &Radionuclide) -> Result<RawTable, DosimetryError> {
        let csv = self
            .tables
            .get(radionuclide.id())
            .ok_or_else(|| DosimetryError::SourceNotFound {
                radionuclide: radionuclide.id().to_string(),
                location: self.describe(radionuclide),
            })?;
        Ok(RawTable::from_reader(csv.as_bytes())?)
    }

    fn describe(&self, radionuclide: &Radionuclide) -> String {
        format!("memory:{}", radionuclide.id())
    }
}
