use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MapperError, Result};
use crate::report::REPORT_FILE_NAME;

/// Runtime settings. Every field has a default, so an absent or partial
/// configuration file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Persisted employee reference table.
    #[serde(default = "default_reference_path")]
    pub reference_path: PathBuf,
    /// Where `process` writes its report when no output is given.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// Optional decorative logo shown by front-ends.
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

fn default_reference_path() -> PathBuf {
    PathBuf::from("database.xlsx")
}

fn default_report_path() -> PathBuf {
    PathBuf::from(REPORT_FILE_NAME)
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("panda.jpg")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_path: default_reference_path(),
            report_path: default_report_path(),
            logo_path: default_logo_path(),
        }
    }
}

impl Config {
    /// Reads a JSON configuration file, or returns the defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(MapperError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Optional assets detected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCapabilities {
    pub logo: Option<PathBuf>,
}

impl AssetCapabilities {
    pub fn probe(config: &Config) -> Self {
        let logo = config
            .logo_path
            .is_file()
            .then(|| config.logo_path.clone());
        info!(logo_present = logo.is_some(), "probed optional assets");
        Self { logo }
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }
}
