//! Cleaning report and result structures for the record cleaning pipeline
//!
//! This module provides the audit trail of what each cleaning stage removed,
//! together with summary counts for downstream presentation.

use crate::app::models::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row dropped because its timestamp was already seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Position of the row in the original dataset
    pub row_index: usize,
    /// Raw time value shared with an earlier row
    pub time_value: String,
}

/// A row dropped because a sensor column was outside its physical range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierEntry {
    /// Position of the row in the original dataset
    pub row_index: usize,
    /// First column that violated its bound
    pub column: String,
    /// Offending raw value
    pub value: String,
    /// Lower bound of the violated range
    pub min: f64,
    /// Upper bound of the violated range
    pub max: f64,
    /// Human-readable explanation
    pub reason: String,
}

/// Record of everything the cleaning pipeline removed or altered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Duplicate removals in original row order
    pub duplicates: Vec<DuplicateEntry>,
    /// Outlier removals in original row order
    pub outliers: Vec<OutlierEntry>,
    /// Number of rows before cleaning
    pub original_count: usize,
    /// Number of rows after cleaning
    pub cleaned_count: usize,
    /// Baseline altitude subtracted from retained rows
    pub base_altitude: f64,
    /// Number of retained rows whose altitude was corrected
    pub altitude_corrected: usize,
}

impl CleaningReport {
    /// Create an empty report for a dataset of the given size
    pub fn new(original_count: usize, base_altitude: f64) -> Self {
        Self {
            duplicates: Vec::new(),
            outliers: Vec::new(),
            original_count,
            cleaned_count: original_count,
            base_altitude,
            altitude_corrected: 0,
        }
    }

    pub fn duplicates_removed(&self) -> usize {
        self.duplicates.len()
    }

    pub fn outliers_removed(&self) -> usize {
        self.outliers.len()
    }

    /// Total rows removed by all stages
    pub fn total_removed(&self) -> usize {
        self.duplicates_removed() + self.outliers_removed()
    }

    /// Check that every original row is either kept or removed exactly once
    pub fn is_consistent(&self) -> bool {
        self.cleaned_count + self.total_removed() == self.original_count
    }

    /// Percentage of original rows removed
    pub fn removal_rate(&self) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            (self.total_removed() as f64 / self.original_count as f64) * 100.0
        }
    }

    /// Outlier counts per violating column
    pub fn outliers_by_column(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for outlier in &self.outliers {
            *counts.entry(outlier.column.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Get summary of the cleaning run
    pub fn summary(&self) -> String {
        format!(
            "Cleaning Summary: {} -> {} rows ({:.1}% removed) | \
             Duplicates: {} | Outliers: {} | Baseline altitude: {} m",
            self.original_count,
            self.cleaned_count,
            self.removal_rate(),
            self.duplicates_removed(),
            self.outliers_removed(),
            self.base_altitude
        )
    }
}

/// Result of a cleaning run
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// Filtered and altitude-corrected dataset
    pub dataset: Dataset,
    /// What was removed and why
    pub report: CleaningReport,
}

impl CleaningResult {
    pub fn new(dataset: Dataset, report: CleaningReport) -> Self {
        Self { dataset, report }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.report.summary()
    }
}
