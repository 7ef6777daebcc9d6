//! JSON configuration selecting a profile and its model options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::slope_model::ModelOptions;

/// Directory searched for catalogue profiles when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Which profile to load and how to build it.
///
/// ```json
/// { "source": "slope1", "data_dir": "tracks", "reverse": true, "sample_step": 5.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Catalogue name or file path.
    pub source: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(flatten)]
    pub options: ModelOptions,
}

impl ProfileConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data_dir: None,
            options: ModelOptions::default(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }
}

pub fn parse_config_json(text: &str) -> Result<ProfileConfig> {
    let config: ProfileConfig = serde_json::from_str(text)?;
    config.options.validate()?;
    Ok(config)
}

pub fn read_config_json(path: impl AsRef<Path>) -> Result<ProfileConfig> {
    let path = path.as_ref();
    let contents = crate::io::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
    parse_config_json(&contents)
}

pub fn write_config_json(path: impl AsRef<Path>, config: &ProfileConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;
    crate::io::write_string(path, &json).map_err(|e| ProfileError::io(path, e))
}
