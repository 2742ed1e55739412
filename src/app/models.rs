//! Data models for telemetry processing
//!
//! This module contains the core data structures for representing a parsed
//! telemetry file: column-keyed rows and the ordered, immutable dataset that
//! holds them.

use crate::constants::{EXPECTED_VARIABLES, ExpectedVariable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerce a raw cell into a finite number
///
/// Surrounding whitespace is ignored. Empty cells, non-numeric text and
/// non-finite values (`inf`, `NaN`) yield `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

// =============================================================================
// Row Structure
// =============================================================================

/// A single telemetry record keyed by column name
///
/// Values are kept exactly as read from the file; numeric interpretation
/// happens when a consumer asks for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from column/value pairs; a repeated column keeps the last value
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.set(column, value);
        }
        row
    }

    /// Raw value for a column, if the row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Numeric value for a column, if present and parseable
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(parse_numeric)
    }

    /// Set a column value, replacing any previous value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Whether the row carries a value for the column
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of populated columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Dataset Structure
// =============================================================================

/// Ordered rows plus the header list from one CSV ingestion
///
/// A dataset is never modified after construction. Derived states (such as a
/// cleaned copy) are built as new datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a dataset from literal records, one value per header position
    ///
    /// Records shorter than the header leave the trailing columns absent.
    pub fn from_records(headers: &[&str], records: &[&[&str]]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                Row::from_pairs(
                    headers
                        .iter()
                        .zip(record.iter())
                        .map(|(column, value)| (*column, *value)),
                )
            })
            .collect();

        Self::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at a given position
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the header declares a column
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Numeric values of a column in row order, skipping unparseable cells
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.numeric(column))
            .collect()
    }

    /// Expected telemetry variables the header does not declare
    pub fn missing_expected_variables(&self) -> Vec<&'static ExpectedVariable> {
        EXPECTED_VARIABLES
            .iter()
            .filter(|variable| !self.has_column(variable.column))
            .collect()
    }
}
