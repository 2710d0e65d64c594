//! Configuration file support
//!
//! ```toml
//! [svalues]
//! dir = "/opt/organdose/svalues"
//!
//! [logging]
//! level = "debug"
//!
//! [[radionuclides]]
//! id = "Tb161"
//! half_life_hours = 166.56
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{Radionuclide, RadionuclideRegistry, RADIONUCLIDES};
use crate::error::DosimetryError;
use crate::svalues::{DirectorySource, SValueProvider};

/// Library configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct DosimetryConfig {
    #[serde(default)]
    pub svalues: SValueConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Radionuclides supported in addition to the built-in ones
    #[serde(default)]
    pub radionuclides: Vec<Radionuclide>,
}

/// Where S-value tables are read from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SValueConfig {
    #[serde(default = "default_svalue_dir")]
    pub dir: PathBuf,
}

impl Default for SValueConfig {
    fn default() -> Self {
        Self {
            dir: default_svalue_dir(),
        }
    }
}

/// Default log filter, overridden by `RUST_LOG`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_svalue_dir() -> PathBuf {
    PathBuf::from("svalues")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DosimetryConfig {
    /// Load configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self, DosimetryError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DosimetryError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, DosimetryError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, DosimetryError> {
        let config: DosimetryConfig =
            toml::from_str(contents).map_err(|e| DosimetryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, DosimetryError> {
        toml::to_string_pretty(self).map_err(|e| DosimetryError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), DosimetryError> {
        for nuclide in &self.radionuclides {
            if !(nuclide.half_life_hours().is_finite() && nuclide.half_life_hours() > 0.0) {
                return Err(DosimetryError::Config(format!(
                    "half-life of {} must be positive, got {}",
                    nuclide.id(),
                    nuclide.half_life_hours()
                )));
            }
            if RADIONUCLIDES.iter().any(|(id, _)| *id == nuclide.id()) {
                return Err(DosimetryError::Config(format!(
                    "{} is already a built-in radionuclide",
                    nuclide.id()
                )));
            }
        }
        Ok(())
    }

    /// Built-in radionuclides plus the configured extras
    pub fn registry(&self) -> RadionuclideRegistry {
        RadionuclideRegistry::new(
            RadionuclideRegistry::default()
                .iter()
                .cloned()
                .chain(self.radionuclides.iter().cloned()),
        )
    }

    /// A provider reading from the configured directory
    pub fn provider(&self) -> SValueProvider {
        SValueProvider::new(DirectorySource::new(&self.svalues.dir))
            .with_registry(Arc::new(self.registry()))
    }
}
