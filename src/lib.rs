//! Telemetry Processor Library
//!
//! A Rust library for cleaning and analysing CSV flight telemetry recorded by
//! small atmospheric probes (temperature, pressure, humidity, gas resistance,
//! inertial axes, attitude and altitude).
//!
//! This library provides tools for:
//! - Parsing telemetry CSV files into ordered, column-keyed rows
//! - Removing duplicate timestamps and physically impossible readings
//! - Correcting altitude against a ground-level baseline
//! - Computing per-column descriptive statistics
//! - Classifying gas-sensor resistance into air-quality tiers, optionally
//!   aggregated by altitude band

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod air_quality;
        pub mod record_cleaner;
        pub mod session;
        pub mod statistics;
        pub mod telemetry_csv_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod report;
}

// Re-export commonly used types
pub use app::models::{Dataset, Row};
pub use app::services::session::{ActiveDataset, TelemetrySession};
pub use config::Config;

/// Result type alias for the telemetry processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for telemetry processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed CSV input; ingestion is aborted
    #[error("CSV parse failure in '{source_name}': {message}")]
    ParseFailure {
        source_name: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// An operation was invoked before the stage it depends on
    #[error("Cannot run '{operation}': {requirement}")]
    InputMissing {
        operation: String,
        requirement: String,
    },

    /// The resistance column needed for air-quality classification is absent
    #[error("No air quality signal: column '{column}' not present in dataset")]
    NoAirQualitySignal { column: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Report serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a CSV parse failure with context
    pub fn parse_failure(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::ParseFailure {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an out-of-order invocation error
    pub fn input_missing(operation: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self::InputMissing {
            operation: operation.into(),
            requirement: requirement.into(),
        }
    }

    /// Create a missing resistance column error
    pub fn no_air_quality_signal(column: impl Into<String>) -> Self {
        Self::NoAirQualitySignal {
            column: column.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Whether the error aborts the run rather than skipping one operation
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::InputMissing { .. } | Error::NoAirQualitySignal { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::ParseFailure {
            source_name: "unknown".to_string(),
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_fatal_errors() {
        assert!(!Error::input_missing("clean", "no dataset loaded").is_fatal());
        assert!(!Error::no_air_quality_signal("Resistencia_Gas_KOhm").is_fatal());

        assert!(Error::parse_failure("flight.csv", "bad utf-8", None).is_fatal());
        assert!(Error::configuration("bad interval").is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::input_missing("clean", "no original dataset has been loaded");
        assert_eq!(
            err.to_string(),
            "Cannot run 'clean': no original dataset has been loaded"
        );

        let err = Error::no_air_quality_signal("Resistencia_Gas_KOhm");
        assert!(err.to_string().contains("Resistencia_Gas_KOhm"));
    }
}
