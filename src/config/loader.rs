//! Configuration loading functionality.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, MileageRates};

/// Loads and provides access to the engine configuration.
///
/// # Example
///
/// ```no_run
/// use finance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rates.yaml").unwrap();
/// let rates = loader.mileage_rates();
/// println!("High rate: {}/mile", rates.high_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` when the file does not exist and
    /// `ConfigParseError` when it cannot be parsed or fails validation.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        if !path.exists() {
            return Err(EngineError::ConfigNotFound { path: display_path });
        }

        let contents = fs::read_to_string(path).map_err(|e| EngineError::ConfigParseError {
            path: display_path.clone(),
            message: e.to_string(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&contents).map_err(|e| EngineError::ConfigParseError {
                path: display_path.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&config, &display_path)?;

        Ok(Self { config })
    }

    /// Creates a loader from an already-built configuration.
    ///
    /// Intended for tests and benchmarks that do not want to touch the
    /// filesystem.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tiered mileage rates.
    pub fn mileage_rates(&self) -> &MileageRates {
        &self.config.mileage
    }

    fn validate(config: &EngineConfig, path: &str) -> EngineResult<()> {
        let mileage = &config.mileage;
        if mileage.threshold_miles <= Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "mileage.threshold_miles must be positive".to_string(),
            });
        }
        if mileage.high_rate < Decimal::ZERO || mileage.low_rate < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "mileage rates must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
