use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::platform::AppPaths;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub tariff: TariffConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base directory for the file backend; defaults to a `store` directory
    /// under the platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    File,
    Memory,
}

/// Tariff rates. Defaults are the reference rates the billing rules were
/// written against; overriding the tax rate changes both tariffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    pub residential_fixed_charge: f64,
    pub residential_price_per_kwh: f64,
    pub commercial_fixed_charge: f64,
    pub commercial_price_per_kwh: f64,
    pub commercial_surcharge: f64,
    pub tax_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            tariff: TariffConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: None,
        }
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            residential_fixed_charge: 1200.0,
            residential_price_per_kwh: 120.0,
            commercial_fixed_charge: 5000.0,
            commercial_price_per_kwh: 150.0,
            commercial_surcharge: 2500.0,
            tax_rate: 0.19,
        }
    }
}

impl AppConfig {
    /// Loads the configuration, writing out the defaults on first run.
    pub fn load(paths: &AppPaths) -> Result<Self> {
        let config_file = paths.config_file();

        if !config_file.exists() {
            info!("Config file not found, creating default configuration");
            let default_config = Self::default();
            default_config.save(paths)?;
            return Ok(default_config);
        }

        info!("Loading configuration from: {:?}", config_file);
        let content = std::fs::read_to_string(&config_file)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from an explicit path instead of the platform config dir.
    pub fn load_from(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, paths: &AppPaths) -> Result<()> {
        let config_file = paths.config_file();
        if let Some(parent) = config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_file, content)?;
        info!("Configuration saved to: {:?}", config_file);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.tariff;
        if !(0.0..=1.0).contains(&t.tax_rate) {
            return Err(Error::validation("tax_rate must be between 0 and 1"));
        }
        for (name, value) in [
            ("residential_fixed_charge", t.residential_fixed_charge),
            ("residential_price_per_kwh", t.residential_price_per_kwh),
            ("commercial_fixed_charge", t.commercial_fixed_charge),
            ("commercial_price_per_kwh", t.commercial_price_per_kwh),
            ("commercial_surcharge", t.commercial_surcharge),
        ] {
            if value < 0.0 {
                return Err(Error::validation(format!("{} must not be negative", name)));
            }
        }
        Ok(())
    }
}
