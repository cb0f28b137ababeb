//! Configuration file support

use crate::error::CliError;
use anyhow::{Context, Result};
use fqsplit_core::{DEFAULT_BUFFER_SIZE, DEFAULT_LINES_PER_RECORD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Suffix for generated output names
pub const DEFAULT_SUFFIX: &str = ".fastq.gz";

/// Speed matters more than file size when splitting
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 1;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Splitting defaults
    #[serde(default)]
    pub split: SplitSection,
}

/// Defaults for the `split` command; flags on the command line win
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitSection {
    /// Lines forming one record
    pub lines_per_record: usize,

    /// Read granularity, e.g. "64K"
    pub buffer_size: String,

    /// Suffix for generated output names
    pub suffix: String,

    /// Compression level for compressed outputs
    pub compression_level: u32,
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            lines_per_record: DEFAULT_LINES_PER_RECORD,
            buffer_size: format!("{}K", DEFAULT_BUFFER_SIZE / 1024),
            suffix: DEFAULT_SUFFIX.to_string(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = CliConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[split]"));
        assert!(text.contains("buffer_size = \"64K\""));
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CliConfig::from_toml("[split]\nsuffix = \".fq\"\n").unwrap();
        assert_eq!(config.split.suffix, ".fq");
        assert_eq!(config.split.lines_per_record, 4);
        assert_eq!(config.split.compression_level, 1);

        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = CliConfig::from_toml("[split]\nthreads = 4\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CliConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
