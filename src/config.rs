//! Configuration management and validation.
//!
//! Provides the configuration structures for cleaning, air-quality
//! aggregation, logging and output, loaded in layers: built-in defaults,
//! then a TOML config file, then environment variables. CLI flags are
//! applied last by the command layer.

use crate::app::services::air_quality::IntervalSpec;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_ALTITUDE, DEFAULT_LOG_LEVEL,
    ENV_ALTITUDE_INTERVAL, ENV_BASE_ALTITUDE, ENV_LOG_LEVEL, LOG_LEVELS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for telemetry processing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cleaning pipeline settings
    pub cleaning: CleaningConfig,

    /// Air-quality classification settings
    pub air_quality: AirQualityConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Report output settings
    pub output: OutputConfig,
}

/// Cleaning pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Ground-level altitude subtracted from raw altitude readings (metres)
    pub base_altitude: f64,

    /// Show progress bars for large files
    pub show_progress: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            base_altitude: DEFAULT_BASE_ALTITUDE,
            show_progress: true,
        }
    }
}

/// Air-quality classification configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQualityConfig {
    /// Altitude aggregation: `"all"` or a positive bucket width in metres
    pub altitude_interval: IntervalSpec,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (error, warn, info, debug, trace)
    pub level: String,

    /// Timestamped log lines; compact lines when false
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            structured: true,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Output format options for pipeline results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting and presentation front ends
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Config {
    /// Default config file location (`<config dir>/telemetry-processor/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a config file, falling back to defaults for missing sections
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load configuration in layers: defaults, optional file, environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment-style overrides from a key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BASE_ALTITUDE) {
            self.cleaning.base_altitude = value.trim().parse::<f64>().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a number, got '{}'",
                    ENV_BASE_ALTITUDE, value
                ))
            })?;
            debug!("Base altitude overridden by environment: {}", value);
        }

        if let Some(value) = lookup(ENV_ALTITUDE_INTERVAL) {
            self.air_quality.altitude_interval = value.parse().map_err(|e: Error| {
                Error::configuration(format!("{}: {}", ENV_ALTITUDE_INTERVAL, e))
            })?;
            debug!("Altitude interval overridden by environment: {}", value);
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value.trim().to_lowercase();
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.cleaning.base_altitude.is_finite() {
            return Err(Error::configuration(format!(
                "Base altitude must be a finite number, got {}",
                self.cleaning.base_altitude
            )));
        }

        if let IntervalSpec::Width(width) = self.air_quality.altitude_interval {
            if !(width.is_finite() && width > 0.0) {
                return Err(Error::configuration(format!(
                    "Altitude interval must be positive, got {}",
                    width
                )));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.cleaning.base_altitude, 571.0);
        assert_eq!(config.air_quality.altitude_interval, IntervalSpec::All);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.output.format, OutputFormat::Human);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cleaning]\nbase_altitude = 612.5\n\n[air_quality]\naltitude_interval = 50\n"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.cleaning.base_altitude, 612.5);
        assert!(config.cleaning.show_progress);
        assert_eq!(config.air_quality.altitude_interval, IntervalSpec::Width(50.0));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_from_file_interval_keyword() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[air_quality]\naltitude_interval = \"all\"\n[output]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.air_quality.altitude_interval, IntervalSpec::All);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[cleaning\nbase_altitude = ").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_ALTITUDE, "100"),
            (ENV_ALTITUDE_INTERVAL, "25"),
            (ENV_LOG_LEVEL, "DEBUG"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.cleaning.base_altitude, 100.0);
        assert_eq!(config.air_quality.altitude_interval, IntervalSpec::Width(25.0));
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_override_rejects_bad_values() {
        let mut config = Config::default();
        let result = config.apply_overrides_from(|key| {
            (key == ENV_BASE_ALTITUDE).then(|| "sea level".to_string())
        });
        assert!(result.is_err());

        let result = config.apply_overrides_from(|key| {
            (key == ENV_ALTITUDE_INTERVAL).then(|| "-5".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_invalid() {
        let mut config = Config::default();
        config.cleaning.base_altitude = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.air_quality.altitude_interval = IntervalSpec::Width(0.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
