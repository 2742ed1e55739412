//! CSV parser for probe telemetry files
//!
//! This module turns raw telemetry CSV into a [`Dataset`](crate::app::models::Dataset).
//! The parser is deliberately tolerant: cells are kept as raw text, rows with
//! missing or surplus fields are retained with a warning, and numeric coercion
//! is deferred to the consumers. Only structural failures (unreadable input,
//! invalid UTF-8, no header row) abort ingestion.
//!
//! ## Architecture
//!
//! - [`parser`] - Reader configuration, header handling and row construction
//! - [`stats`] - Parsing statistics and result structures
//! - [`writer`] - CSV export of a (cleaned) dataset
//!
//! ## Usage
//!
//! ```rust,no_run
//! use telemetry_processor::app::services::telemetry_csv_parser::TelemetryCsvParser;
//!
//! # async fn example() -> telemetry_processor::Result<()> {
//! let parser = TelemetryCsvParser::new();
//! let result = parser.load_file(std::path::Path::new("flight.csv")).await?;
//!
//! println!("Parsed {} rows with {} warnings",
//!          result.dataset.len(),
//!          result.stats.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod stats;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::TelemetryCsvParser;
pub use stats::{ParseResult, ParseStats};
pub use writer::{write_dataset, write_dataset_to};
