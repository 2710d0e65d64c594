use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DosimetryError;

/// Absorbed dose to one target organ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganDose {
    #[serde(rename = "Organ")]
    pub organ: String,
    #[serde(rename = "Dose_Gy")]
    pub dose_gy: f64,
}

/// Absorbed dose (Gy) for every target organ, in taxonomy order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResult {
    radionuclide: String,
    doses: Vec<OrganDose>,
}

impl DoseResult {
    pub(crate) fn new(radionuclide: impl Into<String>, doses: Vec<OrganDose>) -> Self {
        DoseResult {
            radionuclide: radionuclide.into(),
            doses,
        }
    }

    pub fn radionuclide(&self) -> &str {
        &self.radionuclide
    }

    /// Dose to `organ`, `None` if it is not a target organ
    pub fn get(&self, organ: &str) -> Option<f64> {
        self.doses
            .iter()
            .find(|d| d.organ == organ)
            .map(|d| d.dose_gy)
    }

    pub fn doses(&self) -> &[OrganDose] {
        &self.doses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrganDose> {
        self.doses.iter()
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }

    /// Target organ → dose
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.doses
            .iter()
            .map(|d| (d.organ.clone(), d.dose_gy))
            .collect()
    }

    /// Write `Organ,Dose_Gy` rows to `writer`
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), DosimetryError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(writer);
        for dose in &self.doses {
            writer
                .serialize(dose)
                .map_err(|e| DosimetryError::Output(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| DosimetryError::Output(e.to_string()))
    }

    /// Write the result to a CSV file at `path`
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), DosimetryError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| DosimetryError::Output(format!("{}: {}", path.display(), e)))?;
        self.to_writer(file)?;
        tracing::info!("Wrote {} organ doses to {}", self.len(), path.display());
        Ok(())
    }

    /// Write the result as a JSON object holding the radionuclide and the dose list
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<(), DosimetryError> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| DosimetryError::Output(e.to_string()))
    }

    /// Write the result to a JSON file at `path`
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DosimetryError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| DosimetryError::Output(format!("{}: {}", path.display(), e)))?;
        let mut writer = std::io::BufWriter::new(file);
        self.to_json_writer(&mut writer)?;
        writer
            .flush()
            .map_err(|e| DosimetryError::Output(e.to_string()))?;
        tracing::info!("Wrote {} organ doses to {}", self.len(), path.display());
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DoseResult {
    type Item = &'a OrganDose;
    type IntoIter = std::slice::Iter<'a, OrganDose>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DoseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Absorbed doses for {}:", self.radionuclide)?;
        for dose in &self.doses {
            writeln!(f, "  {:<26} {:>12.4e} Gy", dose.organ, dose.dose_gy)?;
        }
        Ok(())
    }
}
