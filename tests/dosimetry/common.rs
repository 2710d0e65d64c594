#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use organdose::prelude::*;
use organdose::svalues::RawTable;

/// Synthetic S-value for target index `t` and source index `s`
pub fn coefficient(t: usize, s: usize) -> f64 {
    1e-4 * (t + 1) as f64 + 1e-6 * (s + 1) as f64
}

/// CSV text of a complete ICRP 89 table built from [coefficient]
pub fn svalue_csv() -> String {
    svalue_csv_without(None)
}

/// Like [svalue_csv] but with the cell at (`target`, `source`) left empty
pub fn svalue_csv_without(skip: Option<(&str, &str)>) -> String {
    let mut out = String::from("Target Organ");
    for source in ICRP89.sources() {
        out.push(',');
        out.push_str(source);
    }
    out.push('\n');
    for (t, target) in ICRP89.targets().iter().enumerate() {
        out.push_str(target);
        for (s, source) in ICRP89.sources().iter().enumerate() {
            out.push(',');
            if skip != Some((target.as_str(), source.as_str())) {
                out.push_str(&coefficient(t, s).to_string());
            }
        }
        out.push('\n');
    }
    out
}

/// Source that counts how often the provider reads from it
pub struct CountingSource {
    inner: InMemorySource,
    loads: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: InMemorySource) -> Arc<Self> {
        Arc::new(CountingSource {
            inner,
            loads: AtomicUsize::new(0),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl SValueSource for CountingSource {
    fn load(&self, radionuclide: &Radionuclide) -> Result<RawTable, DosimetryError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(radionuclide)
    }

    fn describe(&self, radionuclide: &Radionuclide) -> String {
        format!("counting {}", self.inner.describe(radionuclide))
    }
}

/// In-memory source with the synthetic table for every built-in radionuclide
pub fn full_source() -> InMemorySource {
    let csv = svalue_csv();
    let mut source = InMemorySource::new();
    for (id, _) in organdose::data::RADIONUCLIDES {
        source.insert(id, csv.clone());
    }
    source
}

pub fn calculator() -> DoseCalculator {
    DoseCalculator::new(Arc::new(SValueProvider::new(full_source())))
}

/// Synthetic coefficient by organ names
pub fn s(target: &str, source: &str) -> f64 {
    coefficient(
        ICRP89.target_index(target).unwrap(),
        ICRP89.source_index(source).unwrap(),
    )
}
