//! Physical-range filtering for telemetry rows
//!
//! Each bounded sensor column present in a row must hold a number inside its
//! inclusive physical range. Columns missing from the row, or not listed in
//! the bound table, are not checked.

use crate::app::models::{Row, parse_numeric};
use crate::constants::PhysicalBound;
use indicatif::ProgressBar;
use tracing::{debug, info};

use super::report::OutlierEntry;

/// The first bound a row violates
#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub bound: PhysicalBound,
    pub value: String,
    pub reason: String,
}

/// Find the first bounded column that is non-numeric or out of range
///
/// Bounds are checked in table order and evaluation stops at the first
/// violation, so a row is reported against a single column.
pub fn first_violation(row: &Row, bounds: &[PhysicalBound]) -> Option<RangeViolation> {
    for bound in bounds {
        let Some(raw) = row.get(bound.column) else {
            continue;
        };

        let reason = match parse_numeric(raw) {
            None => format!("{} value '{}' is not numeric", bound.column, raw),
            Some(value) if !bound.contains(value) => format!(
                "{} = {} outside physical range [{}, {}]",
                bound.column, value, bound.min, bound.max
            ),
            Some(_) => continue,
        };

        return Some(RangeViolation {
            bound: *bound,
            value: raw.to_string(),
            reason,
        });
    }

    None
}

/// Drop rows that violate any physical bound
///
/// # Arguments
///
/// * `rows` - Rows paired with their original index, in file order
/// * `bounds` - Ordered bound table
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Surviving rows (order preserved) and one entry per dropped row
pub fn apply_range_filter<'a>(
    rows: Vec<(usize, &'a Row)>,
    bounds: &[PhysicalBound],
    progress_bar: Option<&ProgressBar>,
) -> (Vec<(usize, &'a Row)>, Vec<OutlierEntry>) {
    let input_count = rows.len();
    let mut kept = Vec::with_capacity(input_count);
    let mut removed = Vec::new();

    for (index, row) in rows {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        match first_violation(row, bounds) {
            None => kept.push((index, row)),
            Some(violation) => {
                debug!("Row {} dropped: {}", index, violation.reason);
                removed.push(OutlierEntry {
                    row_index: index,
                    column: violation.bound.column.to_string(),
                    value: violation.value,
                    min: violation.bound.min,
                    max: violation.bound.max,
                    reason: violation.reason,
                });
            }
        }
    }

    info!(
        "Range filtering complete: {} -> {} rows ({} outliers removed)",
        input_count,
        kept.len(),
        removed.len()
    );

    (kept, removed)
}
