use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, Rin2IdError};

/// Tag whose value becomes a record's new identifier.
pub const DEFAULT_ALTERNATE_TAG: &str = "RIN";

/// Top-level configuration for a remap run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapConfig {
    /// Tag of the direct child holding the new identifier
    #[serde(default = "default_alternate_tag")]
    pub alternate_tag: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to log remap statistics when done
    #[serde(default = "default_true")]
    pub show_remap_stats: bool,
    /// Whether to log every old => new identifier pair
    #[serde(default)]
    pub show_mappings: bool,
}

fn default_alternate_tag() -> String {
    DEFAULT_ALTERNATE_TAG.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            show_remap_stats: true,
            show_mappings: false,
        }
    }
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            alternate_tag: default_alternate_tag(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RemapConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Rin2IdError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_yaml(&content)?)
    }
}
