//! Record cleaning module for telemetry datasets
//!
//! This module provides the cleaning pipeline applied to a parsed telemetry
//! dataset before statistics and air-quality classification. It never edits
//! the input dataset: every run builds a fresh cleaned dataset and a report
//! describing each removal.
//!
//! # Architecture
//!
//! - [`cleaner`] - Main RecordCleaner struct and pipeline orchestration
//! - [`deduplication`] - Duplicate timestamp removal
//! - [`range_filter`] - Physical plausibility filtering
//! - [`altitude`] - Baseline altitude correction
//! - [`report`] - Cleaning report and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Deduplication**: the first row for each raw `Tiempo_ms` value wins
//! 2. **Range Filtering**: rows with a non-numeric or out-of-range sensor value
//!    are dropped; only the first violating column is reported
//! 3. **Altitude Correction**: `Altitud_m` becomes height above the launch site
//!
//! Every original row ends up either in the cleaned dataset or in exactly one
//! of the report's removal lists.
//!
//! # Example Usage
//!
//! ```rust
//! use telemetry_processor::app::models::Dataset;
//! use telemetry_processor::app::services::record_cleaner::clean;
//!
//! let dataset = Dataset::from_records(
//!     &["Tiempo_ms", "Temperatura_C"],
//!     &[&["0", "20"], &["100", "21"], &["100", "21"], &["200", "999"]],
//! );
//!
//! let result = clean(&dataset, 571.0);
//! println!("{}", result.summary());
//! assert_eq!(result.report.cleaned_count, 2);
//! ```

pub mod altitude;
pub mod cleaner;
pub mod deduplication;
pub mod range_filter;
pub mod report;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use cleaner::{RecordCleaner, clean};
pub use report::{CleaningReport, CleaningResult, DuplicateEntry, OutlierEntry};

// Re-export utility functions that might be useful externally
pub use deduplication::count_duplicate_timestamps;
pub use range_filter::{RangeViolation, first_violation};
