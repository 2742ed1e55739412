//! Comprehensive tests for the record cleaner module
//!
//! This module provides unit tests for each cleaning stage and for the full
//! pipeline.

pub mod deduplication_tests;

// Test helper functions and fixtures
use crate::app::models::{Dataset, Row};
use crate::constants::columns;

/// Create a row with plausible readings for every bounded column
pub fn create_valid_row(time_ms: &str, altitude: &str) -> Row {
    Row::from_pairs([
        (columns::TIME_MS, time_ms),
        (columns::TEMPERATURE, "21.5"),
        (columns::PRESSURE, "944.0"),
        (columns::HUMIDITY, "48.0"),
        (columns::RESISTANCE, "250.0"),
        (columns::ACCEL_X, "0.01"),
        (columns::ACCEL_Y, "-0.02"),
        (columns::ACCEL_Z, "1.0"),
        (columns::GYRO_X, "0.5"),
        (columns::GYRO_Y, "-0.3"),
        (columns::GYRO_Z, "0.1"),
        (columns::ROLL, "1.2"),
        (columns::PITCH, "-0.8"),
        (columns::ALTITUDE, altitude),
    ])
}

/// Header list matching [`create_valid_row`]
pub fn full_headers() -> Vec<String> {
    [
        columns::TIME_MS,
        columns::TEMPERATURE,
        columns::PRESSURE,
        columns::HUMIDITY,
        columns::RESISTANCE,
        columns::ACCEL_X,
        columns::ACCEL_Y,
        columns::ACCEL_Z,
        columns::GYRO_X,
        columns::GYRO_Y,
        columns::GYRO_Z,
        columns::ROLL,
        columns::PITCH,
        columns::ALTITUDE,
    ]
    .iter()
    .map(|h| h.to_string())
    .collect()
}

/// Create a dataset of valid rows at 100 ms spacing climbing 10 m per row
pub fn create_climb_dataset(count: usize) -> Dataset {
    let rows = (0..count)
        .map(|i| create_valid_row(&(i * 100).to_string(), &(571 + i * 10).to_string()))
        .collect();
    Dataset::new(full_headers(), rows)
}

/// The four-row scenario with one duplicate and one overheated reading
pub fn create_duplicate_and_outlier_dataset() -> Dataset {
    Dataset::from_records(
        &[columns::TIME_MS, columns::TEMPERATURE],
        &[&["0", "20"], &["100", "21"], &["100", "21"], &["200", "999"]],
    )
}

/// Pair rows with their index, as the cleaning stages expect
pub fn indexed(dataset: &Dataset) -> Vec<(usize, &Row)> {
    dataset.rows().iter().enumerate().collect()
}
