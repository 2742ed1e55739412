//! Baseline altitude correction
//!
//! Barometric altitude is logged above sea level; the pipeline reports it
//! above the launch site by subtracting a baseline.

use crate::app::models::Row;

/// Copy a row, replacing a numeric altitude with `altitude - base_altitude`
///
/// Returns the new row and whether a correction was applied. A row without
/// the altitude column, or with a non-numeric value there, is copied as-is.
pub fn correct_altitude(row: &Row, altitude_column: &str, base_altitude: f64) -> (Row, bool) {
    let mut corrected = row.clone();

    match row.numeric(altitude_column) {
        Some(altitude) => {
            corrected.set(altitude_column, format_value(altitude - base_altitude));
            (corrected, true)
        }
        None => (corrected, false),
    }
}

/// Render a derived value without a trailing `.0` for whole numbers
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}
