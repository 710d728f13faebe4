//! Pipeline configuration.
//!
//! Every key is optional in the TOML file; missing keys take the defaults
//! below. Command-line flags are applied on top by the caller.
//!
//! ```toml
//! url = "https://www.kugou.com/yy/rank/home/1-8888.html"
//! data_dir = "data/kugou-charts"
//! limit = 20
//! min_entries = 5
//! timeout_secs = 60
//! fallback_on_fetch_error = true
//! ```

use chartwatch_core::errors::{ExError, ExErrorKind, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_URL: &str = "https://www.kugou.com/yy/rank/home/1-8888.html";
pub const DEFAULT_DATA_DIR: &str = "data/kugou-charts";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Chart page to capture
    pub url: String,
    /// Directory holding one JSON snapshot per date
    pub data_dir: PathBuf,
    /// Maximum number of entries kept per snapshot
    pub limit: usize,
    /// Entries a strategy must yield to be trusted
    pub min_entries: usize,
    /// HTTP request timeout
    pub timeout_secs: u64,
    /// Substitute the baseline dataset when the fetch fails or nothing is
    /// extracted; when off, both fail the run
    pub fallback_on_fetch_error: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            limit: chartwatch_core::extract::DEFAULT_LIMIT,
            min_entries: chartwatch_core::extract::DEFAULT_MIN_ENTRIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fallback_on_fetch_error: true,
        }
    }
}

impl PipelineConfig {
    /// Read a TOML config file.
    ///
    /// # Errors
    ///
    /// - `Io`: the file could not be read
    /// - `InvalidConfig`: the file is not valid TOML for this schema, or a
    ///   value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| e.with_entity_id(path.display().to_string()))
    }

    /// Parse and validate TOML config text.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: parse failure or out-of-range value
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidConfig)
                .with_op("parse_config")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// - `InvalidConfig`: empty url, zero limit or zero timeout
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(invalid_config("url must not be empty"));
        }
        if self.limit == 0 {
            return Err(invalid_config("limit must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid_config("timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

fn invalid_config(message: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("validate_config")
        .with_message(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_chart_capture() {
        let config = PipelineConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.data_dir, PathBuf::from("data/kugou-charts"));
        assert_eq!(config.limit, 20);
        assert_eq!(config.min_entries, 5);
        assert_eq!(config.timeout_secs, 60);
        assert!(config.fallback_on_fetch_error);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = PipelineConfig::from_toml_str("limit = 10\n").unwrap();
        assert_eq!(config.limit, 10);
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = PipelineConfig::from_toml_str("limit = 0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }
}
