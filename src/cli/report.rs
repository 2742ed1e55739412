//! Report rendering for pipeline results
//!
//! Each result type renders in the three output formats: human-readable text
//! for the terminal, JSON for presentation front ends and scripting, and CSV
//! for spreadsheet analysis. Renderers return the text; the command layer
//! decides where it goes.

use colored::*;
use serde_json::json;
use std::fmt::Write as _;

use crate::app::services::air_quality::{AirQualityAssessment, AltitudeProfile};
use crate::app::services::record_cleaner::CleaningReport;
use crate::app::services::session::ActiveDataset;
use crate::app::services::statistics::{ChartType, ColumnSummary, SeriesPoint};
use crate::app::services::telemetry_csv_parser::ParseStats;
use crate::config::OutputFormat;
use crate::{Error, Result};

fn to_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to render JSON report", e))
}

/// Run `write` against an in-memory CSV writer and return the text
///
/// Fields are quoted by the writer, so header names taken verbatim from the
/// input file stay one field each.
fn to_csv<F>(write: F) -> Result<String>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    write(&mut writer).map_err(|e| Error::io("Failed to render CSV report", e.into()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::io("Failed to flush CSV report", e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::data_validation(format!("CSV report is not valid UTF-8: {}", e)))
}

// =============================================================================
// Cleaning
// =============================================================================

/// Render a cleaning report
pub fn render_cleaning(report: &CleaningReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(cleaning_human(report)),
        OutputFormat::Json => to_json(&json!({ "cleaning": report })),
        OutputFormat::Csv => cleaning_csv(report),
    }
}

fn cleaning_human(report: &CleaningReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "Cleaning Report".bright_green().bold());
    let _ = writeln!(out, "   • Original rows: {}", report.original_count);
    let _ = writeln!(
        out,
        "   • Cleaned rows: {}",
        report.cleaned_count.to_string().bright_white().bold()
    );
    let _ = writeln!(out, "   • Duplicates removed: {}", report.duplicates_removed());
    let _ = writeln!(out, "   • Outliers removed: {}", report.outliers_removed());
    let _ = writeln!(out, "   • Removal rate: {:.1}%", report.removal_rate());
    let _ = writeln!(
        out,
        "   • Baseline altitude: {} m ({} rows corrected)",
        report.base_altitude, report.altitude_corrected
    );

    if !report.duplicates.is_empty() {
        let _ = writeln!(out, "\n{}", "Duplicate timestamps:".bright_yellow());
        for entry in &report.duplicates {
            let _ = writeln!(
                out,
                "   row {:>6}  Tiempo_ms = {}",
                entry.row_index, entry.time_value
            );
        }
    }

    if !report.outliers.is_empty() {
        let _ = writeln!(out, "\n{}", "Out-of-range rows:".bright_yellow());
        for entry in &report.outliers {
            let _ = writeln!(out, "   row {:>6}  {}", entry.row_index, entry.reason);
        }

        let _ = writeln!(out, "\n{}", "Outliers by column:".bright_yellow());
        for (column, count) in report.outliers_by_column() {
            let _ = writeln!(out, "   • {}: {}", column, count);
        }
    }

    out
}

fn cleaning_csv(report: &CleaningReport) -> Result<String> {
    let rows = [
        ("original_rows", report.original_count.to_string()),
        ("cleaned_rows", report.cleaned_count.to_string()),
        ("duplicates_removed", report.duplicates_removed().to_string()),
        ("outliers_removed", report.outliers_removed().to_string()),
        ("base_altitude_m", report.base_altitude.to_string()),
        ("altitude_corrected", report.altitude_corrected.to_string()),
    ];

    to_csv(|writer| {
        writer.write_record(["metric", "value"])?;
        for (metric, value) in &rows {
            writer.write_record([*metric, value.as_str()])?;
        }
        Ok(())
    })
}

// =============================================================================
// Statistics
// =============================================================================

/// Render per-column statistics
pub fn render_stats(
    summaries: &[ColumnSummary],
    dataset: ActiveDataset,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(stats_human(summaries, dataset)),
        OutputFormat::Json => to_json(&json!({
            "dataset": dataset.to_string(),
            "columns": summaries,
        })),
        OutputFormat::Csv => stats_csv(summaries),
    }
}

fn stats_human(summaries: &[ColumnSummary], dataset: ActiveDataset) -> String {
    let mut out = String::new();
    let title = format!("Column Statistics ({} dataset)", dataset);
    let _ = writeln!(out, "\n{}", title.bright_green().bold());

    if summaries.is_empty() {
        let _ = writeln!(out, "   No numeric columns");
        return out;
    }

    let _ = writeln!(
        out,
        "   {:<24} {:>10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "column", "count", "min", "max", "mean", "median", "std dev"
    );
    for summary in summaries {
        let label = match &summary.unit {
            Some(unit) => format!("{} ({})", summary.column, unit),
            None => summary.column.clone(),
        };
        let stats = &summary.stats;
        let _ = writeln!(
            out,
            "   {:<24} {:>10} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            label, stats.count, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
        );
    }
    out
}

fn stats_csv(summaries: &[ColumnSummary]) -> Result<String> {
    to_csv(|writer| {
        writer.write_record([
            "column", "unit", "count", "min", "max", "mean", "median", "std_dev",
        ])?;
        for summary in summaries {
            let stats = &summary.stats;
            writer.write_record([
                summary.column.clone(),
                summary.unit.clone().unwrap_or_default(),
                stats.count.to_string(),
                stats.min.to_string(),
                stats.max.to_string(),
                stats.mean.to_string(),
                stats.median.to_string(),
                stats.std_dev.to_string(),
            ])?;
        }
        Ok(())
    })
}

// =============================================================================
// Air quality
// =============================================================================

/// Render an air-quality assessment
pub fn render_air_quality(
    assessment: &AirQualityAssessment,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(air_quality_human(assessment)),
        OutputFormat::Json => to_json(&json!({ "airQuality": assessment })),
        OutputFormat::Csv => air_quality_csv(assessment),
    }
}

fn air_quality_human(assessment: &AirQualityAssessment) -> String {
    let mut out = String::new();
    let classification = &assessment.classification;

    let _ = writeln!(out, "\n{}", "Air Quality".bright_green().bold());
    for (tier, values) in classification.iter() {
        let (low, high) = tier.range();
        let range = match high {
            Some(high) => format!("[{}, {}) kΩ", low, high),
            None => format!("≥ {} kΩ", low),
        };
        let _ = writeln!(
            out,
            "   • {:<10} {:<16} {:>6} ({:.1}%)",
            tier.label(),
            range,
            values.len(),
            classification.percentage(tier)
        );
    }

    match &assessment.summary {
        Some(summary) => {
            let _ = writeln!(
                out,
                "\n   Predominant tier: {}",
                summary.predominant_tier.label().bright_white().bold()
            );
            let _ = writeln!(
                out,
                "   Resistance mean {:.2} kΩ, min {:.2} kΩ, max {:.2} kΩ over {} readings",
                summary.mean, summary.min, summary.max, summary.sample_count
            );
        }
        None => {
            let _ = writeln!(out, "\n   No classifiable resistance readings");
        }
    }

    let _ = writeln!(
        out,
        "\n{} (interval: {})",
        "Altitude profile".bright_green(),
        assessment.interval
    );
    match &assessment.profile {
        AltitudeProfile::Raw(points) => {
            let _ = writeln!(out, "   {} points", points.len());
        }
        AltitudeProfile::Bucketed(buckets) => {
            for bucket in buckets {
                let _ = writeln!(
                    out,
                    "   band {:>9.1} m  mean altitude {:>9.1} m  resistance {:>9.2} kΩ  ({} rows)",
                    bucket.band_start, bucket.altitude, bucket.resistance, bucket.count
                );
            }
        }
    }

    out
}

fn air_quality_csv(assessment: &AirQualityAssessment) -> Result<String> {
    let classification = &assessment.classification;
    to_csv(|writer| {
        writer.write_record(["tier", "min_kohm", "max_kohm", "count", "percentage"])?;
        for (tier, values) in classification.iter() {
            let (low, high) = tier.range();
            writer.write_record([
                tier.key().to_string(),
                low.to_string(),
                high.map(|h| h.to_string()).unwrap_or_default(),
                values.len().to_string(),
                format!("{:.2}", classification.percentage(tier)),
            ])?;
        }
        Ok(())
    })
}

// =============================================================================
// Series
// =============================================================================

/// Render an axis-pair series
pub fn render_series(
    points: &[SeriesPoint],
    x_column: &str,
    y_column: &str,
    chart: ChartType,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "chart": chart,
            "x": x_column,
            "y": y_column,
            "points": points,
        })),
        OutputFormat::Human | OutputFormat::Csv => to_csv(|writer| {
            writer.write_record([x_column, y_column])?;
            for point in points {
                writer.write_record([point.x.to_string(), point.y.to_string()])?;
            }
            Ok(())
        }),
    }
}

// =============================================================================
// Combined report
// =============================================================================

/// Everything the `report` command prints
#[derive(Debug)]
pub struct FullReport<'a> {
    pub source: String,
    pub headers: &'a [String],
    pub parse_stats: Option<&'a ParseStats>,
    pub cleaning: &'a CleaningReport,
    pub stats: &'a [ColumnSummary],
    /// `None` when the file carries no resistance column
    pub air_quality: Option<&'a AirQualityAssessment>,
}

/// Render the combined report
pub fn render_full_report(report: &FullReport<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "source": report.source,
            "headers": report.headers,
            "parse": report.parse_stats,
            "cleaning": report.cleaning,
            "statistics": report.stats,
            "airQuality": report.air_quality,
        })),
        OutputFormat::Human => {
            let mut out = format!(
                "{} {}\n",
                "Telemetry report:".bright_green().bold(),
                report.source
            );
            if let Some(parse_stats) = report.parse_stats {
                let _ = writeln!(
                    out,
                    "   {} rows parsed from {} records ({} columns, {} warnings)",
                    parse_stats.rows_parsed,
                    parse_stats.total_records,
                    report.headers.len(),
                    parse_stats.warnings.len()
                );
            }
            out.push_str(&cleaning_human(report.cleaning));
            out.push_str(&stats_human(report.stats, ActiveDataset::Cleaned));
            match report.air_quality {
                Some(assessment) => out.push_str(&air_quality_human(assessment)),
                None => {
                    let notice = "Air quality: no resistance column".bright_yellow();
                    let _ = writeln!(out, "\n{}", notice);
                }
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut out = cleaning_csv(report.cleaning)?;
            out.push('\n');
            out.push_str(&stats_csv(report.stats)?);
            if let Some(assessment) = report.air_quality {
                out.push('\n');
                out.push_str(&air_quality_csv(assessment)?);
            }
            Ok(out)
        }
    }
}
