//! Descriptive statistics over numeric telemetry columns

use crate::app::models::Dataset;
use crate::constants::unit_for;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Descriptive statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Element at index `n / 2` of the sorted values
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub count: usize,
}

/// Statistics for a named column, with its unit when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub stats: ColumnStats,
}

/// Compute descriptive statistics for already-filtered numeric values
///
/// The median is the upper-middle element for even-length input (no
/// averaging) and the standard deviation divides by `n`. Returns `None` for
/// an empty slice.
pub fn describe(values: &[f64]) -> Option<ColumnStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let n = count as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(ColumnStats {
        min: sorted[0],
        max: sorted[count - 1],
        mean,
        median: sorted[count / 2],
        std_dev: variance.sqrt(),
        count,
    })
}

/// Describe every column of a dataset that has at least one numeric value
///
/// Columns are returned in header order; columns with no numeric cells are
/// left out.
pub fn describe_dataset(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .headers()
        .iter()
        .filter_map(|column| {
            let values = dataset.numeric_column(column);
            match describe(&values) {
                Some(stats) => Some(ColumnSummary {
                    column: column.clone(),
                    unit: unit_for(column).map(str::to_string),
                    stats,
                }),
                None => {
                    debug!("Column '{}' has no numeric values; skipped", column);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;

    #[test]
    fn test_describe_odd_length() {
        let stats = describe(&[3.0, 1.0, 2.0]).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_median_even_length_takes_upper_middle() {
        let stats = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        // sorted [1, 2, 3, 4], index 2
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_population_std_dev() {
        let stats = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert_eq!(stats.mean, 5.0);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        let stats = describe(&[42.0]).unwrap();

        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn test_ordering_invariants() {
        let samples: [&[f64]; 4] = [
            &[-5.0, 10.0, 0.0],
            &[1.5, 1.5, 1.5, 1.5],
            &[100.0, -100.0],
            &[0.1, 0.7, 0.3, 0.9, 0.2, 0.8],
        ];

        for values in samples {
            let stats = describe(values).unwrap();
            assert!(stats.min <= stats.median);
            assert!(stats.median <= stats.max);
            assert!(stats.std_dev >= 0.0);
            assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        }
    }

    #[test]
    fn test_describe_dataset_skips_non_numeric_columns() {
        let dataset = Dataset::from_records(
            &[columns::TIME_MS, "status", columns::PRESSURE],
            &[&["0", "OK", "944"], &["100", "OK", "bad"], &["200", "LOST", "940"]],
        );

        let summaries = describe_dataset(&dataset);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column, columns::TIME_MS);
        assert_eq!(summaries[0].unit.as_deref(), Some("ms"));
        assert_eq!(summaries[1].column, columns::PRESSURE);
        assert_eq!(summaries[1].stats.count, 2);
        assert_eq!(summaries[1].stats.mean, 942.0);
    }
}
