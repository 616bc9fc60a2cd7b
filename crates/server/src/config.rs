use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use voucherdrop_core::ModerationConfig;
use voucherdrop_extract::{ConfigError, ExtractorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Bunyan-style JSON lines.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// TOML file with categories, label patterns and moderation settings.
    pub config_path: Option<PathBuf>,
    pub log_format: LogFormat,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            config_path: None,
            log_format: LogFormat::Pretty,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    /// Read `VOUCHERDROP_*` environment variables; unset or unparsable values
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("VOUCHERDROP_HOST").unwrap_or(defaults.host),
            port: lookup("VOUCHERDROP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            config_path: lookup("VOUCHERDROP_CONFIG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_format: lookup("VOUCHERDROP_LOG_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.log_format),
            max_body_bytes: lookup("VOUCHERDROP_MAX_BODY_BYTES")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModerationSection {
    moderation: ModerationConfig,
}

/// Load extractor and moderation settings from one TOML file, or the
/// built-in defaults when no file is configured.
pub fn load_settings(path: Option<&Path>) -> Result<(ExtractorConfig, ModerationConfig), ConfigError> {
    let Some(path) = path else {
        return Ok((ExtractorConfig::default(), ModerationConfig::default()));
    };

    let content = std::fs::read_to_string(path)?;
    let extractor = ExtractorConfig::from_toml(&content)?;
    let section: ModerationSection = toml::from_str(&content)?;
    Ok((extractor, section.moderation))
}
