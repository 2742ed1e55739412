//! Parsing statistics and result structures for telemetry CSV ingestion
//!
//! This module provides types for tracking what the parser tolerated while
//! reading a file and for handing the parsed dataset to the pipeline.

use crate::app::models::Dataset;
use serde::{Deserialize, Serialize};

/// Parsing result with the dataset and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed dataset in file order
    pub dataset: Dataset,

    /// Basic parsing statistics
    pub stats: ParseStats,

    /// Expected telemetry columns absent from the header (advisory)
    pub missing_expected: Vec<String>,
}

impl ParseResult {
    /// Whether every expected telemetry column was found
    pub fn has_all_expected(&self) -> bool {
        self.missing_expected.is_empty()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of data records encountered (excluding the header)
    pub total_records: usize,

    /// Number of rows added to the dataset
    pub rows_parsed: usize,

    /// Records made only of empty or whitespace fields
    pub blank_records_skipped: usize,

    /// Records with fewer fields than the header
    pub short_records: usize,

    /// Records with more fields than the header
    pub long_records: usize,

    /// Header names declared more than once
    pub duplicate_headers: Vec<String>,

    /// Non-fatal warnings for debugging
    pub warnings: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal warning
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Percentage of records that became rows
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Whether any record needed a tolerance rule
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
