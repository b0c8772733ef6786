//! Workbook configuration (`gridlink.toml`).
//!
//! ```toml
//! [limits]
//! max_rows = 1048576
//! max_cols = 16384
//!
//! [log]
//! level = "warn"
//! ```
//!
//! Every section and field is optional; unknown fields are rejected.

use crate::error::{GridlinkError, Result};
use serde::Deserialize;
use std::path::Path;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Limits {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_rows: 1_048_576,
            max_cols: 16_384,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// Default filter when `GRIDLINK_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub limits: Limits,
    pub log: LogConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.limits.max_rows == 0 || config.limits.max_cols == 0 {
            return Err(GridlinkError::Config(
                "limits must allow at least one row and one column".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(GridlinkError::Config(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_limits() {
        let config = Config::from_toml_str("[limits]\nmax_rows = 10\n").unwrap();
        assert_eq!(config.limits.max_rows, 10);
        assert_eq!(config.limits.max_cols, Limits::default().max_cols);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            Config::from_toml_str("[limits]\nmax_height = 3\n"),
            Err(GridlinkError::Config(_))
        ));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(Config::from_toml_str("[limits]\nmax_cols = 0\n").is_err());
    }
}
