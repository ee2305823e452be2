use ordercast_core::{Error, Result};
use ordercast_storage::{DataPaths, DEFAULT_CUSTOMERS_FILE, DEFAULT_LOCATIONS_FILE, DEFAULT_VENDORS_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_MODEL_FILE: &str = "xgboost_model.json";

/// Where the reference tables and the model artifact live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub customers_file: String,
    pub locations_file: String,
    pub vendors_file: String,
    /// Explicit artifact path; defaults to `data_dir/xgboost_model.json`
    pub model_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            customers_file: DEFAULT_CUSTOMERS_FILE.to_string(),
            locations_file: DEFAULT_LOCATIONS_FILE.to_string(),
            vendors_file: DEFAULT_VENDORS_FILE.to_string(),
            model_path: None,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("customers_file", &self.customers_file),
            ("locations_file", &self.locations_file),
            ("vendors_file", &self.vendors_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            customers: self.data_dir.join(&self.customers_file),
            locations: self.data_dir.join(&self.locations_file),
            vendors: self.data_dir.join(&self.vendors_file),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_MODEL_FILE))
    }
}
