//! Core telemetry CSV parser implementation
//!
//! This module handles file reading, header extraction and row construction.
//! Structural errors are fatal; per-record irregularities are logged and
//! counted but never abort the batch.

use std::path::Path;
use tracing::{debug, info, warn};

use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Dataset, Row};
use crate::{Error, Result};

/// Parser for probe telemetry CSV files
///
/// The header row is taken verbatim as the column list. When a name is
/// declared twice, the header list keeps its first position and row values
/// follow last-write-wins.
#[derive(Debug, Clone)]
pub struct TelemetryCsvParser {
    delimiter: u8,
}

impl Default for TelemetryCsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TelemetryCsvParser {
    /// Create a comma-delimited parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter (e.g. `b';'` for locale exports)
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and parse a telemetry file
    ///
    /// The whole file is read before parsing starts; the future resolves once
    /// with either the full dataset or a single error.
    pub async fn load_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Loading telemetry file: {}", file_path.display());

        let content = tokio::fs::read(file_path).await.map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let source_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        self.parse_bytes(&content, &source_name)
    }

    /// Parse CSV text already held in memory
    pub fn parse_str(&self, content: &str, source_name: &str) -> Result<ParseResult> {
        self.parse_bytes(content.as_bytes(), source_name)
    }

    /// Parse raw CSV bytes
    pub fn parse_bytes(&self, content: &[u8], source_name: &str) -> Result<ParseResult> {
        let mut stats = ParseStats::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(content);

        let raw_headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| {
                let message = format!("Failed to read CSV header: {}", e);
                Error::parse_failure(source_name, message, Some(e))
            })?
            .iter()
            .map(str::to_string)
            .collect();

        if raw_headers.iter().all(|header| header.trim().is_empty()) {
            return Err(Error::parse_failure(
                source_name,
                "Missing header row",
                None,
            ));
        }

        let headers = self.unique_headers(&raw_headers, &mut stats);
        debug!("Header declares {} columns: {:?}", headers.len(), headers);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| {
                let message = format!(
                    "CSV error after record {}: {}",
                    stats.total_records, e
                );
                Error::parse_failure(source_name, message, Some(e))
            })?;
            stats.total_records += 1;

            if record.iter().all(|field| field.trim().is_empty()) {
                stats.blank_records_skipped += 1;
                continue;
            }

            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(stats.total_records as u64 + 1);

            if record.len() < raw_headers.len() {
                stats.short_records += 1;
                let message = format!(
                    "Line {}: expected {} fields, found {}; missing columns absent",
                    line,
                    raw_headers.len(),
                    record.len()
                );
                warn!("{}", message);
                stats.add_warning(message);
            } else if record.len() > raw_headers.len() {
                stats.long_records += 1;
                let message = format!(
                    "Line {}: expected {} fields, found {}; extra fields ignored",
                    line,
                    raw_headers.len(),
                    record.len()
                );
                warn!("{}", message);
                stats.add_warning(message);
            }

            let row = Row::from_pairs(
                raw_headers
                    .iter()
                    .zip(record.iter())
                    .map(|(column, value)| (column.as_str(), value)),
            );
            rows.push(row);
            stats.rows_parsed += 1;
        }

        let dataset = Dataset::new(headers, rows);

        let missing_expected: Vec<String> = dataset
            .missing_expected_variables()
            .iter()
            .map(|variable| variable.column.to_string())
            .collect();
        if !missing_expected.is_empty() {
            warn!(
                "{} expected telemetry columns not found: {}",
                missing_expected.len(),
                missing_expected.join(", ")
            );
        }

        info!(
            "Parsed {} rows from {} records in {} ({} warnings)",
            stats.rows_parsed,
            stats.total_records,
            source_name,
            stats.warnings.len()
        );

        Ok(ParseResult {
            dataset,
            stats,
            missing_expected,
        })
    }

    /// Collapse repeated header names onto their first position
    fn unique_headers(&self, raw_headers: &[String], stats: &mut ParseStats) -> Vec<String> {
        let mut headers: Vec<String> = Vec::with_capacity(raw_headers.len());

        for header in raw_headers {
            if headers.contains(header) {
                if !stats.duplicate_headers.contains(header) {
                    let message = format!(
                        "Column '{}' declared more than once; later values win",
                        header
                    );
                    warn!("{}", message);
                    stats.add_warning(message);
                    stats.duplicate_headers.push(header.clone());
                }
            } else {
                headers.push(header.clone());
            }
        }

        headers
    }
}
