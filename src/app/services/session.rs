//! Owned pipeline session
//!
//! A session holds at most one `original` dataset (read-only once loaded) and
//! at most one `cleaned` dataset (rebuilt wholesale each time cleaning runs),
//! plus a selector naming which of the two downstream operations read.
//! Switching the selector never copies or touches either snapshot.

use std::path::Path;
use tracing::info;

use crate::app::models::Dataset;
use crate::app::services::air_quality::{
    AirQualityAssessment, AltitudeProfile, IntervalSpec, aggregate_by_altitude, assess,
};
use crate::app::services::record_cleaner::{CleaningReport, RecordCleaner};
use crate::app::services::statistics::{
    ColumnSummary, SeriesPoint, describe_dataset, extract_series,
};
use crate::app::services::telemetry_csv_parser::{ParseResult, ParseStats, TelemetryCsvParser};
use crate::config::CleaningConfig;
use crate::{Error, Result};

/// Which dataset snapshot downstream operations consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ActiveDataset {
    /// The dataset as parsed from the file
    #[default]
    Original,
    /// The output of the most recent cleaning run
    Cleaned,
}

impl std::fmt::Display for ActiveDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveDataset::Original => f.write_str("original"),
            ActiveDataset::Cleaned => f.write_str("cleaned"),
        }
    }
}

/// Session state for one telemetry file
#[derive(Debug, Default)]
pub struct TelemetrySession {
    parser: TelemetryCsvParser,
    cleaning: CleaningConfig,
    original: Option<Dataset>,
    cleaned: Option<Dataset>,
    last_report: Option<CleaningReport>,
    parse_stats: Option<ParseStats>,
    active: ActiveDataset,
}

impl TelemetrySession {
    /// Create an empty session
    pub fn new(cleaning: CleaningConfig) -> Self {
        Self {
            cleaning,
            ..Self::default()
        }
    }

    /// Use a custom parser (e.g. a different delimiter)
    pub fn with_parser(mut self, parser: TelemetryCsvParser) -> Self {
        self.parser = parser;
        self
    }

    /// Load a telemetry file as the new `original` dataset
    ///
    /// Any previous cleaned dataset and report are discarded and the
    /// selection returns to `original`. On failure the session is unchanged.
    pub async fn load(&mut self, file_path: &Path) -> Result<&ParseStats> {
        let result = self.parser.load_file(file_path).await?;
        Ok(self.install(result))
    }

    /// Install an already-parsed dataset as the new `original`
    pub fn load_dataset(&mut self, dataset: Dataset) {
        self.reset(dataset);
        self.parse_stats = None;
    }

    fn install(&mut self, result: ParseResult) -> &ParseStats {
        self.reset(result.dataset);
        self.parse_stats.insert(result.stats)
    }

    fn reset(&mut self, dataset: Dataset) {
        info!(
            "Session loaded {} rows, {} columns",
            dataset.len(),
            dataset.headers().len()
        );
        self.original = Some(dataset);
        self.cleaned = None;
        self.last_report = None;
        self.active = ActiveDataset::Original;
    }

    /// Clean the `original` dataset against a baseline altitude
    ///
    /// Rebuilds `cleaned` from scratch and selects it. Fails with
    /// `InputMissing` when nothing has been loaded.
    pub fn clean(&mut self, base_altitude: f64) -> Result<&CleaningReport> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| Error::input_missing("clean", "no original dataset has been loaded"))?;

        let cleaner = RecordCleaner::new(CleaningConfig {
            base_altitude,
            ..self.cleaning.clone()
        });
        let result = cleaner.clean(original);

        self.cleaned = Some(result.dataset);
        self.active = ActiveDataset::Cleaned;
        Ok(&*self.last_report.insert(result.report))
    }

    /// Clean with the configured baseline altitude
    pub fn clean_default(&mut self) -> Result<&CleaningReport> {
        self.clean(self.cleaning.base_altitude)
    }

    /// Select which snapshot downstream operations read
    pub fn select(&mut self, active: ActiveDataset) -> Result<()> {
        let available = match active {
            ActiveDataset::Original => self.original.is_some(),
            ActiveDataset::Cleaned => self.cleaned.is_some(),
        };
        if !available {
            return Err(Error::input_missing(
                format!("select {}", active),
                format!("no {} dataset exists", active),
            ));
        }
        self.active = active;
        Ok(())
    }

    pub fn active(&self) -> ActiveDataset {
        self.active
    }

    pub fn original(&self) -> Option<&Dataset> {
        self.original.as_ref()
    }

    pub fn cleaned(&self) -> Option<&Dataset> {
        self.cleaned.as_ref()
    }

    /// Report from the most recent cleaning run
    pub fn last_report(&self) -> Option<&CleaningReport> {
        self.last_report.as_ref()
    }

    /// Statistics from the most recent file load
    pub fn parse_stats(&self) -> Option<&ParseStats> {
        self.parse_stats.as_ref()
    }

    /// The currently selected dataset
    pub fn current(&self) -> Result<&Dataset> {
        let dataset = match self.active {
            ActiveDataset::Original => self.original.as_ref(),
            ActiveDataset::Cleaned => self.cleaned.as_ref(),
        };
        dataset.ok_or_else(|| {
            Error::input_missing(
                "read current dataset",
                format!("no {} dataset exists", self.active),
            )
        })
    }

    /// Column headers of the current dataset
    pub fn headers(&self) -> Result<&[String]> {
        Ok(self.current()?.headers())
    }

    /// Descriptive statistics for every numeric column of the current dataset
    pub fn describe(&self) -> Result<Vec<ColumnSummary>> {
        Ok(describe_dataset(self.current()?))
    }

    /// Air-quality classification, summary and altitude profile
    pub fn classify(&self, interval: IntervalSpec) -> Result<AirQualityAssessment> {
        assess(self.current()?, interval)
    }

    /// Resistance against altitude for the current dataset
    pub fn aggregate(&self, interval: IntervalSpec) -> Result<AltitudeProfile> {
        aggregate_by_altitude(self.current()?, interval)
    }

    /// Numeric pairs for an ad-hoc chart
    pub fn series(&self, x_column: &str, y_column: &str) -> Result<Vec<SeriesPoint>> {
        extract_series(self.current()?, x_column, y_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;

    fn scenario_dataset() -> Dataset {
        Dataset::from_records(
            &[columns::TIME_MS, columns::TEMPERATURE, columns::RESISTANCE, columns::ALTITUDE],
            &[
                &["0", "20", "350", "571"],
                &["100", "21", "250", "600"],
                &["100", "21", "250", "600"],
                &["200", "999", "150", "620"],
            ],
        )
    }

    #[test]
    fn test_clean_before_load_is_input_missing() {
        let mut session = TelemetrySession::default();

        let err = session.clean(571.0).unwrap_err();
        assert!(matches!(err, Error::InputMissing { .. }));
        assert!(!err.is_fatal());
        assert!(session.last_report().is_none());
        assert!(session.current().is_err());
    }

    #[test]
    fn test_clean_selects_cleaned_and_keeps_original() {
        let mut session = TelemetrySession::default();
        session.load_dataset(scenario_dataset());

        let report = session.clean(571.0).unwrap();
        assert_eq!(report.cleaned_count, 2);

        assert_eq!(session.active(), ActiveDataset::Cleaned);
        assert_eq!(session.current().unwrap().len(), 2);
        assert_eq!(session.original().unwrap().len(), 4);
        assert_eq!(session.original().unwrap().rows()[1].get(columns::ALTITUDE), Some("600"));
        assert_eq!(session.cleaned().unwrap().rows()[1].get(columns::ALTITUDE), Some("29"));
    }

    #[test]
    fn test_select_switches_without_copying() {
        let mut session = TelemetrySession::default();
        session.load_dataset(scenario_dataset());

        assert!(matches!(
            session.select(ActiveDataset::Cleaned),
            Err(Error::InputMissing { .. })
        ));
        assert_eq!(session.active(), ActiveDataset::Original);

        session.clean(571.0).unwrap();
        session.select(ActiveDataset::Original).unwrap();
        assert_eq!(session.current().unwrap().len(), 4);

        session.select(ActiveDataset::Cleaned).unwrap();
        assert_eq!(session.current().unwrap().len(), 2);
    }

    #[test]
    fn test_recleaning_rebuilds_from_original() {
        let mut session = TelemetrySession::default();
        session.load_dataset(scenario_dataset());

        session.clean(571.0).unwrap();
        session.clean(500.0).unwrap();

        let cleaned = session.cleaned().unwrap();
        assert_eq!(cleaned.rows()[1].get(columns::ALTITUDE), Some("100"));
        assert_eq!(session.last_report().unwrap().base_altitude, 500.0);
    }

    #[test]
    fn test_reload_discards_cleaned() {
        let mut session = TelemetrySession::default();
        session.load_dataset(scenario_dataset());
        session.clean(571.0).unwrap();

        session.load_dataset(scenario_dataset());
        assert!(session.cleaned().is_none());
        assert!(session.last_report().is_none());
        assert_eq!(session.active(), ActiveDataset::Original);
    }

    #[test]
    fn test_downstream_operations_follow_selection() {
        let mut session = TelemetrySession::default();
        session.load_dataset(scenario_dataset());

        let original = session.classify(IntervalSpec::All).unwrap();
        assert_eq!(original.classification.total(), 4);

        session.clean(571.0).unwrap();
        let cleaned = session.classify(IntervalSpec::All).unwrap();
        assert_eq!(cleaned.classification.total(), 2);

        let stats = session.describe().unwrap();
        assert!(stats.iter().any(|summary| summary.column == columns::ALTITUDE));
        assert_eq!(session.series(columns::TIME_MS, columns::ALTITUDE).unwrap().len(), 2);
    }
}
