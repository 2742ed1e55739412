//! Axis-pair extraction for ad-hoc charts
//!
//! The presentation layer picks any two columns and a chart type; this module
//! supplies the numeric pairs. The chart type is passed through untouched.

use crate::app::models::Dataset;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Chart kinds the presentation layer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Scatter,
    Bar,
}

/// One plotted point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

/// Numeric (x, y) pairs for two columns, in row order
///
/// Rows where either cell is not numeric are skipped.
pub fn extract_series(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
) -> Result<Vec<SeriesPoint>> {
    for column in [x_column, y_column] {
        if !dataset.has_column(column) {
            return Err(Error::data_validation(format!(
                "Unknown column '{}'. Available columns: {}",
                column,
                dataset.headers().join(", ")
            )));
        }
    }

    Ok(dataset
        .rows()
        .iter()
        .filter_map(|row| {
            Some(SeriesPoint {
                x: row.numeric(x_column)?,
                y: row.numeric(y_column)?,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;

    #[test]
    fn test_extract_series() {
        let dataset = Dataset::from_records(
            &[columns::TIME_MS, columns::TEMPERATURE],
            &[&["0", "20"], &["100", "x"], &["200", "22"]],
        );

        let points = extract_series(&dataset, columns::TIME_MS, columns::TEMPERATURE).unwrap();

        assert_eq!(
            points,
            vec![
                SeriesPoint { x: 0.0, y: 20.0 },
                SeriesPoint { x: 200.0, y: 22.0 },
            ]
        );
    }

    #[test]
    fn test_unknown_column() {
        let dataset = Dataset::from_records(&[columns::TIME_MS], &[&["0"]]);
        let err = extract_series(&dataset, columns::TIME_MS, "Voltaje").unwrap_err();

        assert!(matches!(err, Error::DataValidation { .. }));
        assert!(err.to_string().contains("Voltaje"));
    }
}
