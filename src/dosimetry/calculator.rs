use std::sync::Arc;

use rayon::prelude::*;

use crate::data::{CumulatedActivity, OrganInput, OrganTaxonomy, TimeActivityTable};
use crate::dosimetry::{DoseResult, OrganDose};
use crate::error::DosimetryError;
use crate::svalues::{CoefficientTable, SValueProvider};

/// Converts the cross-organ contribution from mGy to Gy
pub const MGY_TO_GY: f64 = 1e-3;

/// Computes organ doses from activity data and cached S-value tables
///
/// The calculator is a thin, cloneable handle around a shared
/// [`SValueProvider`]; every computation is a pure function of its inputs and
/// the provider's tables.
#[derive(Debug, Clone)]
pub struct DoseCalculator {
    provider: Arc<SValueProvider>,
}

impl DoseCalculator {
    pub fn new(provider: Arc<SValueProvider>) -> Self {
        DoseCalculator { provider }
    }

    pub fn provider(&self) -> &SValueProvider {
        &self.provider
    }

    pub fn taxonomy(&self) -> &OrganTaxonomy {
        self.provider.taxonomy()
    }

    /// Integrate every source-organ series of `table` into cumulated activity
    ///
    /// Series for organs outside the source set are skipped with a warning.
    pub fn cumulated_from_series(&self, table: &TimeActivityTable) -> CumulatedActivity {
        let taxonomy = self.taxonomy();
        table
            .iter()
            .filter(|series| {
                let known = taxonomy.is_source(series.organ());
                if !known {
                    tracing::warn!("Ignoring series for unknown source organ {}", series.organ());
                }
                known
            })
            .map(|series| (series.organ(), series.cumulated_activity()))
            .collect()
    }

    /// Doses from measured time-activity curves
    ///
    /// Each series is integrated with the linear trapezoidal rule (hours → s,
    /// MBq → Bq) and the result is passed to
    /// [`compute_from_cumulated`](Self::compute_from_cumulated). Organs without a
    /// series contribute nothing.
    pub fn compute_from_series(
        &self,
        table: &TimeActivityTable,
        radionuclide: &str,
    ) -> Result<DoseResult, DosimetryError> {
        let activity = self.cumulated_from_series(table);
        self.compute_from_cumulated(&activity, radionuclide)
    }

    /// Doses from a mix of per-organ series and cumulated activities
    ///
    /// An organ supplied more than once is rejected with
    /// [`DosimetryError::InvalidActivity`].
    pub fn compute_from_inputs(
        &self,
        inputs: &[OrganInput],
        radionuclide: &str,
    ) -> Result<DoseResult, DosimetryError> {
        let mut activity = CumulatedActivity::new();
        for input in inputs {
            let value = input.cumulated_activity();
            if activity.insert(input.organ(), value).is_some() {
                return Err(DosimetryError::InvalidActivity {
                    organ: input.organ().to_string(),
                    value,
                });
            }
        }
        self.compute_from_cumulated(&activity, radionuclide)
    }

    /// Doses from cumulated activity (Bq·s) per source organ
    ///
    /// For each target organ `T`:
    ///
    /// ```text
    /// D(T) = Ã(C)·S(T, C)                 if T is a wall with contents C
    ///      + Σ_S Ã(S)·S(T, S)·1e-3        over all source organs
    /// ```
    ///
    /// The wall term is applied on top of the regular contents contribution,
    /// so a wall receives its contents coefficient twice: once unconverted
    /// and once scaled by `1e-3`.
    ///
    /// # Errors
    ///
    /// [`DosimetryError::InvalidActivity`] for a negative or non-finite value,
    /// checked before anything else, and any error of
    /// [`SValueProvider::get`].
    pub fn compute_from_cumulated(
        &self,
        activity: &CumulatedActivity,
        radionuclide: &str,
    ) -> Result<DoseResult, DosimetryError> {
        activity.validate()?;
        let table = self.provider.get(radionuclide)?;

        for (organ, _) in activity {
            if !table.taxonomy().is_source(organ) {
                tracing::warn!("Ignoring cumulated activity for unknown source organ {}", organ);
            }
        }
        tracing::debug!(
            "Computing {} doses from {} source organs",
            radionuclide,
            activity.len()
        );

        Ok(accumulate(&table, activity))
    }

    /// [`compute_from_series`](Self::compute_from_series) for many tables in parallel
    ///
    /// Results are returned in the order of `tables`.
    pub fn compute_batch(
        &self,
        tables: &[TimeActivityTable],
        radionuclide: &str,
    ) -> Vec<Result<DoseResult, DosimetryError>> {
        tables
            .par_iter()
            .map(|table| self.compute_from_series(table, radionuclide))
            .collect()
    }
}

fn accumulate(table: &CoefficientTable, activity: &CumulatedActivity) -> DoseResult {
    let taxonomy = table.taxonomy();
    let sources: Vec<f64> = taxonomy
        .sources()
        .iter()
        .map(|organ| activity.get(organ))
        .collect();

    let doses = taxonomy
        .targets()
        .iter()
        .enumerate()
        .map(|(t, target)| {
            let mut dose = 0.0;
            if let Some(c) = taxonomy.contents_index(t) {
                dose += sources[c] * table.value(t, c);
            }
            for (coefficient, a) in table.row(t).iter().zip(&sources) {
                dose += a * coefficient * MGY_TO_GY;
            }
            OrganDose {
                organ: target.clone(),
                dose_gy: dose,
            }
        })
        .collect();

    DoseResult::new(table.radionuclide(), doses)
}
