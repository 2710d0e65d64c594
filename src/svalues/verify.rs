//! Integrity report over a set of S-value tables
//!
//! Unlike [`SValueProvider`](crate::svalues::SValueProvider), verification
//! never fails on bad data: it loads every registered radionuclide and
//! records what it found.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{OrganTaxonomy, RadionuclideRegistry};
use crate::svalues::{CoefficientTable, DirectorySource, RawTable, SValueSource};

/// Tolerance for the symmetry check
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Findings for one radionuclide's table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    /// The data could be located and parsed
    pub loaded: bool,
    /// Every source column and target row of the taxonomy is present
    pub complete: bool,
    /// No present value is negative
    pub non_negative: bool,
    /// `S[a, b] == S[b, a]` for every organ pair labelling both a row and a column
    pub symmetric: bool,
    /// The table passes full provider validation
    pub valid: bool,
    /// First problem encountered, if any
    pub error: Option<String>,
}

impl TableReport {
    pub fn is_ok(&self) -> bool {
        self.loaded && self.complete && self.non_negative && self.symmetric
    }
}

/// Verify every registered radionuclide in `source`
pub fn verify_source(
    source: &dyn SValueSource,
    registry: &RadionuclideRegistry,
    taxonomy: &std::sync::Arc<OrganTaxonomy>,
) -> BTreeMap<String, TableReport> {
    registry
        .iter()
        .map(|nuclide| {
            let report = match source.load(nuclide) {
                Ok(raw) => inspect(nuclide.id(), &raw, taxonomy),
                Err(e) => TableReport {
                    error: Some(e.to_string()),
                    ..TableReport::default()
                },
            };
            if !report.is_ok() {
                tracing::warn!("S-value table for {} failed verification", nuclide.id());
            }
            (nuclide.id().to_string(), report)
        })
        .collect()
}

/// Verify the `<dir>/<ID>.csv` files of every registered radionuclide
pub fn verify_directory(
    dir: impl AsRef<Path>,
    registry: &RadionuclideRegistry,
    taxonomy: &std::sync::Arc<OrganTaxonomy>,
) -> BTreeMap<String, TableReport> {
    verify_source(&DirectorySource::new(dir.as_ref()), registry, taxonomy)
}

fn inspect(
    radionuclide: &str,
    raw: &RawTable,
    taxonomy: &std::sync::Arc<OrganTaxonomy>,
) -> TableReport {
    let complete = taxonomy
        .sources()
        .iter()
        .all(|s| raw.columns().contains(s))
        && taxonomy.targets().iter().all(|t| raw.rows().contains(t));
    let non_negative = raw.values().all(|v| v >= 0.0);
    let symmetric = is_symmetric(raw);
    let validation = CoefficientTable::from_raw(radionuclide, raw, taxonomy.clone());

    TableReport {
        loaded: true,
        complete,
        non_negative,
        symmetric,
        valid: validation.is_ok(),
        error: validation.err().map(|e| e.to_string()),
    }
}

fn is_symmetric(raw: &RawTable) -> bool {
    for a in raw.rows() {
        for b in raw.columns() {
            if !raw.columns().contains(a) || !raw.rows().contains(b) {
                continue;
            }
            match (raw.get(a, b), raw.get(b, a)) {
                (Some(x), Some(y)) if (x - y).abs() < SYMMETRY_TOLERANCE => {}
                (None, None) => {}
                _ => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Radionuclide;
    use crate::svalues::InMemorySource;
    use std::sync::Arc;

    fn setup() -> (RadionuclideRegistry, Arc<OrganTaxonomy>) {
        let registry = RadionuclideRegistry::new([
            Radionuclide::new("F18", 1.83),
            Radionuclide::new("Ga68", 1.13),
            Radionuclide::new("Cu64", 12.7),
        ]);
        let taxonomy = Arc::new(
            OrganTaxonomy::new(["Liver", "Kidneys"], ["Liver", "Kidneys"], []).unwrap(),
        );
        (registry, taxonomy)
    }

    #[test]
    fn reports_each_radionuclide() {
        let (registry, taxonomy) = setup();
        let source = InMemorySource::new()
            .with_table("F18", "T,Liver,Kidneys\nLiver,1,2\nKidneys,2,1\n")
            .with_table("Ga68", "T,Liver,Kidneys\nLiver,1,2\nKidneys,3,1\n");

        let reports = verify_source(&source, &registry, &taxonomy);
        assert_eq!(reports.len(), 3);

        let f18 = &reports["F18"];
        assert!(f18.is_ok());
        assert!(f18.valid);

        let ga68 = &reports["Ga68"];
        assert!(ga68.loaded && ga68.complete && ga68.valid);
        assert!(!ga68.symmetric);
        assert!(!ga68.is_ok());

        let cu64 = &reports["Cu64"];
        assert!(!cu64.loaded);
        assert!(cu64.error.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn negative_value_is_flagged() {
        let (registry, taxonomy) = setup();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("F18.csv"),
            "T,Liver,Kidneys\nLiver,1,-2\nKidneys,-2,1\n",
        )
        .unwrap();

        let reports = verify_directory(dir.path(), &registry, &taxonomy);
        let f18 = &reports["F18"];
        assert!(f18.symmetric);
        assert!(!f18.non_negative);
        assert!(!f18.valid);
    }
}
