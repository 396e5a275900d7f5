use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Extractor configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Capture log written by the trap node
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Tab-separated interval report
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Whether a run accumulates onto the report or replaces it
    #[serde(default)]
    pub write_mode: WriteMode,
    /// Log every dropped Photo line at debug level
    #[serde(default)]
    pub log_skipped: bool,
}

/// How the report file is opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Keep existing rows; header only when the file is new or empty
    #[default]
    Append,
    /// Discard existing rows and always write the header
    Truncate,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("log_banda.txt")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            output_path: default_output_path(),
            write_mode: WriteMode::default(),
            log_skipped: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Reject configurations the extractor cannot run with
    pub fn validate(&self) -> std::result::Result<(), Error> {
        let extractor = &self.extractor;

        if extractor.log_path.as_os_str().is_empty() {
            return Err(Error::Config("log_path must not be empty".to_string()));
        }
        if extractor.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output_path must not be empty".to_string()));
        }
        if extractor.log_path == extractor.output_path {
            return Err(Error::Config(format!(
                "log_path and output_path both point to {:?}",
                extractor.log_path
            )));
        }

        match self.logging.log_level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(Error::Config(format!("unknown log level '{}'", other))),
        }
    }
}

/// Load configuration from a file or use default
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;

            let config = if path.extension().map_or(false, |ext| ext == "json") {
                serde_json::from_str(&config_str).context("Failed to parse JSON config")?
            } else if path.extension().map_or(false, |ext| ext == "toml") {
                toml::from_str(&config_str).context("Failed to parse TOML config")?
            } else {
                return Err(anyhow::anyhow!("Unsupported config file format"));
            };

            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = load_config(None).unwrap();

        assert_eq!(config.extractor.log_path, PathBuf::from("log_banda.txt"));
        assert_eq!(config.extractor.output_path, PathBuf::from("output.txt"));
        assert_eq!(config.extractor.write_mode, WriteMode::Append);
        assert!(!config.extractor.log_skipped);
        assert_eq!(config.logging.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("extractor.toml");
        std::fs::write(
            &path,
            "[extractor]\noutput_path = \"intervals.tsv\"\nwrite_mode = \"truncate\"\n",
        )?;

        let config = load_config(Some(&path))?;

        assert_eq!(config.extractor.log_path, PathBuf::from("log_banda.txt"));
        assert_eq!(config.extractor.output_path, PathBuf::from("intervals.tsv"));
        assert_eq!(config.extractor.write_mode, WriteMode::Truncate);
        assert_eq!(config.logging.log_level, "info");
        Ok(())
    }

    #[test]
    fn test_json_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("extractor.json");
        std::fs::write(
            &path,
            r#"{"extractor": {"log_path": "trap.log", "log_skipped": true}, "logging": {"log_level": "debug"}}"#,
        )?;

        let config = load_config(Some(&path))?;

        assert_eq!(config.extractor.log_path, PathBuf::from("trap.log"));
        assert!(config.extractor.log_skipped);
        assert_eq!(config.logging.log_level, "debug");
        Ok(())
    }

    #[test]
    fn test_unsupported_extension_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("extractor.yaml");
        std::fs::write(&path, "extractor: {}\n")?;

        assert!(load_config(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_validate_rejects_same_input_and_output() {
        let mut config = Config::default();
        config.extractor.output_path = config.extractor.log_path.clone();

        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let mut config = Config::default();
        config.extractor.log_path = PathBuf::new();

        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.log_level = "verbose".to_string();

        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
