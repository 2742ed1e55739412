//! Timestamp deduplication for telemetry rows
//!
//! The probe occasionally writes the same sample twice when the radio link
//! retransmits. Rows are keyed by the raw time field: the first row for a
//! given value is kept, later ones are dropped and reported.

use crate::app::models::Row;
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

use super::report::DuplicateEntry;

/// Remove rows whose raw time value has already been seen
///
/// Comparison is exact string equality on the raw field, with no numeric
/// coercion. Rows that do not carry the time column are always kept.
///
/// # Arguments
///
/// * `rows` - Rows paired with their original index, in file order
/// * `time_column` - Column used as the deduplication key
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Surviving rows (order preserved) and one entry per dropped row
pub fn remove_duplicate_timestamps<'a>(
    rows: Vec<(usize, &'a Row)>,
    time_column: &str,
    progress_bar: Option<&ProgressBar>,
) -> (Vec<(usize, &'a Row)>, Vec<DuplicateEntry>) {
    let input_count = rows.len();
    let mut seen: HashSet<&'a str> = HashSet::with_capacity(input_count);
    let mut kept = Vec::with_capacity(input_count);
    let mut removed = Vec::new();

    for (index, row) in rows {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        let Some(time_value) = row.get(time_column) else {
            kept.push((index, row));
            continue;
        };

        if seen.insert(time_value) {
            kept.push((index, row));
        } else {
            debug!(
                "Row {} dropped: duplicate {} value '{}'",
                index, time_column, time_value
            );
            removed.push(DuplicateEntry {
                row_index: index,
                time_value: time_value.to_string(),
            });
        }
    }

    info!(
        "Deduplication complete: {} -> {} rows ({} duplicates removed)",
        input_count,
        kept.len(),
        removed.len()
    );

    (kept, removed)
}

/// Count rows that share a time value with an earlier row
pub fn count_duplicate_timestamps(rows: &[Row], time_column: &str) -> usize {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|row| row.get(time_column))
        .filter(|time_value| !seen.insert(*time_value))
        .count()
}
