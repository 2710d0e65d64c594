use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::data::{OrganTaxonomy, Radionuclide, RadionuclideRegistry, DEFAULT_REGISTRY, ICRP89};
use crate::error::DosimetryError;
use crate::svalues::{CoefficientTable, DirectorySource, SValueSource};

/// Loads, validates and caches one [`CoefficientTable`] per radionuclide
///
/// The provider is `Send + Sync` and meant to be shared. The first request for
/// an identifier loads and validates its table while holding that cache
/// entry, so concurrent first requests trigger a single load. Published
/// tables are immutable `Arc`s read without further locking. Failed loads
/// leave no entry behind and are retried on the next request.
pub struct SValueProvider {
    source: Box<dyn SValueSource>,
    taxonomy: Arc<OrganTaxonomy>,
    registry: Arc<RadionuclideRegistry>,
    cache: DashMap<String, Arc<CoefficientTable>>,
}

impl SValueProvider {
    /// Provider over `source` using the ICRP 89 taxonomy and the built-in registry
    pub fn new(source: impl SValueSource + 'static) -> Self {
        SValueProvider {
            source: Box::new(source),
            taxonomy: ICRP89.clone(),
            registry: DEFAULT_REGISTRY.clone(),
            cache: DashMap::new(),
        }
    }

    /// Provider reading `<dir>/<ID>.csv`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySource::new(dir))
    }

    pub fn with_taxonomy(mut self, taxonomy: Arc<OrganTaxonomy>) -> Self {
        self.taxonomy = taxonomy;
        self.cache.clear();
        self
    }

    pub fn with_registry(mut self, registry: Arc<RadionuclideRegistry>) -> Self {
        self.registry = registry;
        self.cache.clear();
        self
    }

    pub fn taxonomy(&self) -> &Arc<OrganTaxonomy> {
        &self.taxonomy
    }

    pub fn registry(&self) -> &RadionuclideRegistry {
        &self.registry
    }

    /// The validated table for `radionuclide`
    ///
    /// # Errors
    ///
    /// - [`DosimetryError::UnsupportedRadionuclide`] if the identifier is not registered
    /// - [`DosimetryError::SourceNotFound`] if the source has no data for it
    /// - [`DosimetryError::SchemaViolation`] / [`DosimetryError::DataIntegrity`]
    ///   if the data fails validation
    pub fn get(&self, radionuclide: &str) -> Result<Arc<CoefficientTable>, DosimetryError> {
        let nuclide = self.registry.get(radionuclide)?;

        if let Some(table) = self.cache.get(radionuclide) {
            tracing::debug!("S-value cache hit for {}", radionuclide);
            return Ok(Arc::clone(table.value()));
        }

        let entry = self
            .cache
            .entry(radionuclide.to_string())
            .or_try_insert_with(|| self.load(nuclide))?;
        Ok(Arc::clone(entry.value()))
    }

    /// Whether a table for `radionuclide` has been published
    pub fn is_cached(&self, radionuclide: &str) -> bool {
        self.cache.contains_key(radionuclide)
    }

    /// Number of cached tables
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, nuclide: &Radionuclide) -> Result<Arc<CoefficientTable>, DosimetryError> {
        tracing::info!(
            "Loading S-values for {} from {}",
            nuclide.id(),
            self.source.describe(nuclide)
        );
        let raw = self.source.load(nuclide)?;
        let table = CoefficientTable::from_raw(nuclide.id(), &raw, Arc::clone(&self.taxonomy))
            .inspect_err(|e| tracing::warn!("Rejected S-values for {}: {}", nuclide.id(), e))?;
        Ok(Arc::new(table))
    }
}

impl std::fmt::Debug for SValueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SValueProvider")
            .field("registry", &self.registry.ids().collect::<Vec<_>>())
            .field("cached", &self.cache.len())
            .finish()
    }
}
