// src/config.rs

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON file that overrides the defaults.
pub const CONFIG_ENV_VAR: &str = "PPH_RISK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    // Export
    pub export_dir: PathBuf,          // Default: <documents>/pph-risk
    pub export_file_name: String,     // Default: pph_risk_records.csv
    pub date_format: String,          // Default: %Y-%m-%d %H:%M:%S

    // Batch
    pub max_parallel_evaluations: usize, // Default: num_cpus::get()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        IntakeConfig {
            export_dir: default_export_dir(),
            export_file_name: "pph_risk_records.csv".to_string(),
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            max_parallel_evaluations: num_cpus::get(),
        }
    }
}

impl IntakeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `PPH_RISK_CONFIG` if set, otherwise the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }
}

fn default_export_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pph-risk")
}

// Global configuration
lazy_static! {
    pub static ref INTAKE_CONFIG: IntakeConfig = IntakeConfig::load().unwrap_or_else(|err| {
        log::warn!("Falling back to default configuration: {}", err);
        IntakeConfig::default()
    });
}
