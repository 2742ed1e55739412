//! Main record cleaner implementation and pipeline orchestration
//!
//! This module contains the RecordCleaner struct and coordinates the three
//! cleaning stages. Stages run in a fixed order and each sees only the rows
//! that survived the previous one.

use crate::app::models::{Dataset, Row};
use crate::config::CleaningConfig;
use crate::constants::{PHYSICAL_BOUNDS, PROGRESS_BAR_THRESHOLD, columns};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::{
    altitude::correct_altitude,
    deduplication::remove_duplicate_timestamps,
    range_filter::apply_range_filter,
    report::{CleaningReport, CleaningResult},
};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Record cleaner for telemetry datasets
///
/// Applies the cleaning pipeline:
/// 1. Duplicate removal keyed on the raw time column
/// 2. Physical-range filtering against the bound table
/// 3. Altitude baseline correction
///
/// The input dataset is never modified; the result holds a new dataset.
///
/// # Example
///
/// ```rust
/// use telemetry_processor::app::models::Dataset;
/// use telemetry_processor::app::services::record_cleaner::RecordCleaner;
/// use telemetry_processor::config::CleaningConfig;
///
/// let dataset = Dataset::from_records(
///     &["Tiempo_ms", "Altitud_m"],
///     &[&["0", "600"], &["0", "601"]],
/// );
/// let cleaner = RecordCleaner::new(CleaningConfig::default());
/// let result = cleaner.clean(&dataset);
///
/// assert_eq!(result.report.duplicates_removed(), 1);
/// assert_eq!(result.dataset.rows()[0].get("Altitud_m"), Some("29"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordCleaner {
    config: CleaningConfig,
}

impl RecordCleaner {
    /// Create a new record cleaner with the given configuration
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Create a cleaner with default settings and a specific baseline altitude
    pub fn with_base_altitude(base_altitude: f64) -> Self {
        Self::new(CleaningConfig {
            base_altitude,
            ..CleaningConfig::default()
        })
    }

    /// Get the cleaning configuration used by this cleaner
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Run the full cleaning pipeline over a dataset
    pub fn clean(&self, dataset: &Dataset) -> CleaningResult {
        let base_altitude = self.config.base_altitude;
        let mut report = CleaningReport::new(dataset.len(), base_altitude);

        info!(
            "Starting cleaning pipeline for {} rows (baseline altitude {} m)",
            dataset.len(),
            base_altitude
        );

        if !dataset.has_column(columns::TIME_MS) {
            warn!(
                "Column '{}' not found; duplicate removal has no key",
                columns::TIME_MS
            );
        }

        let show_progress =
            self.config.show_progress && dataset.len() >= PROGRESS_BAR_THRESHOLD;
        let indexed: Vec<(usize, &Row)> = dataset.rows().iter().enumerate().collect();

        // Step 1: Remove duplicate timestamps
        let dedup_pb = show_progress
            .then(|| Self::create_cleaning_progress_bar(indexed.len() as u64, "Deduplication"));
        let (deduplicated, duplicates) =
            remove_duplicate_timestamps(indexed, columns::TIME_MS, dedup_pb.as_ref());
        if let Some(pb) = dedup_pb {
            pb.finish_with_message(format!(
                "Deduplication complete: {} rows",
                deduplicated.len()
            ));
        }
        report.duplicates = duplicates;

        // Step 2: Drop physically impossible readings
        let filter_pb = show_progress.then(|| {
            Self::create_cleaning_progress_bar(deduplicated.len() as u64, "Range filtering")
        });
        let (in_range, outliers) =
            apply_range_filter(deduplicated, PHYSICAL_BOUNDS, filter_pb.as_ref());
        if let Some(pb) = filter_pb {
            pb.finish_with_message(format!("Range filtering complete: {} rows", in_range.len()));
        }
        report.outliers = outliers;

        // Step 3: Altitude relative to the launch site
        let mut rows = Vec::with_capacity(in_range.len());
        for (_, row) in in_range {
            let (corrected, applied) = correct_altitude(row, columns::ALTITUDE, base_altitude);
            if applied {
                report.altitude_corrected += 1;
            }
            rows.push(corrected);
        }
        debug!(
            "Altitude corrected on {} of {} rows",
            report.altitude_corrected,
            rows.len()
        );

        report.cleaned_count = rows.len();
        let cleaned = Dataset::new(dataset.headers().to_vec(), rows);

        info!("{}", report.summary());

        if !report.is_consistent() {
            // Each row is either kept or recorded by exactly one stage
            warn!(
                "Cleaning report counts do not add up: {} + {} != {}",
                report.cleaned_count,
                report.total_removed(),
                report.original_count
            );
        }

        CleaningResult::new(cleaned, report)
    }

    /// Create a progress bar for cleaning stages
    fn create_cleaning_progress_bar(total: u64, operation: &str) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(operation.to_string());
        pb
    }
}

impl Default for RecordCleaner {
    fn default() -> Self {
        Self::new(CleaningConfig::default())
    }
}

/// Clean a dataset with the given baseline altitude
pub fn clean(dataset: &Dataset, base_altitude: f64) -> CleaningResult {
    RecordCleaner::with_base_altitude(base_altitude).clean(dataset)
}
