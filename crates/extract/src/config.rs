use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voucherdrop_core::CategoryVocabulary;

use crate::labels::{LabelField, LabelPatterns};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        field: LabelField,
        pattern: String,
        source: regex::Error,
    },
    #[error("The {field} pattern '{pattern}' has no capture group")]
    MissingCaptureGroup { field: LabelField, pattern: String },
}

/// Extraction vocabulary: the category list and the per-field label patterns.
/// Anything omitted from a TOML file keeps its built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub categories: CategoryVocabulary,
    pub labels: LabelPatterns,
}

impl ExtractorConfig {
    /// Parse and check a TOML document. Label patterns are compiled here so a
    /// bad pattern is reported at load time, not on first extraction.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: ExtractorConfig = toml::from_str(toml_content)?;
        config.labels.compile()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
