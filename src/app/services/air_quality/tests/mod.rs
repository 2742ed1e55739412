//! Tests for resistance classification and altitude aggregation

pub mod aggregation_tests;

// Test helper functions and fixtures
use crate::app::models::Dataset;
use crate::constants::columns;

/// Dataset with one reading per quality tier, climbing 100 m per row
pub fn create_tiered_dataset() -> Dataset {
    Dataset::from_records(
        &[columns::TIME_MS, columns::RESISTANCE, columns::ALTITUDE],
        &[
            &["0", "350", "0"],
            &["100", "250", "100"],
            &["200", "150", "200"],
            &["300", "75", "300"],
            &["400", "10", "400"],
        ],
    )
}

/// Dataset without an altitude column
pub fn create_resistance_only_dataset(values: &[&str]) -> Dataset {
    let records: Vec<Vec<&str>> = values.iter().map(|value| vec![*value]).collect();
    let record_refs: Vec<&[&str]> = records.iter().map(Vec::as_slice).collect();
    Dataset::from_records(&[columns::RESISTANCE], &record_refs)
}
