//! Tests for timestamp deduplication

use super::*;
use crate::app::services::record_cleaner::deduplication::{
    count_duplicate_timestamps, remove_duplicate_timestamps,
};

#[test]
fn test_no_duplicates() {
    let dataset = create_climb_dataset(5);
    let (kept, removed) = remove_duplicate_timestamps(indexed(&dataset), columns::TIME_MS, None);

    assert_eq!(kept.len(), 5);
    assert!(removed.is_empty());
}

#[test]
fn test_first_occurrence_wins() {
    let dataset = Dataset::from_records(
        &[columns::TIME_MS, columns::TEMPERATURE],
        &[&["0", "20"], &["100", "21"], &["100", "35"], &["100", "36"]],
    );
    let (kept, removed) = remove_duplicate_timestamps(indexed(&dataset), columns::TIME_MS, None);

    assert_eq!(kept.len(), 2);
    assert_eq!(kept[1].0, 1);
    assert_eq!(kept[1].1.get(columns::TEMPERATURE), Some("21"));

    assert_eq!(removed.len(), 2);
    assert_eq!(removed[0].row_index, 2);
    assert_eq!(removed[0].time_value, "100");
    assert_eq!(removed[1].row_index, 3);
}

#[test]
fn test_exact_raw_comparison() {
    // "100" and "100.0" are numerically equal but not the same raw value
    let dataset = Dataset::from_records(
        &[columns::TIME_MS],
        &[&["100"], &["100.0"], &[" 100"], &["100"]],
    );
    let (kept, removed) = remove_duplicate_timestamps(indexed(&dataset), columns::TIME_MS, None);

    assert_eq!(kept.len(), 3);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].row_index, 3);
}

#[test]
fn test_rows_without_time_column_are_kept() {
    let dataset = Dataset::from_records(&["other"], &[&["1"], &["1"]]);
    let (kept, removed) = remove_duplicate_timestamps(indexed(&dataset), columns::TIME_MS, None);

    assert_eq!(kept.len(), 2);
    assert!(removed.is_empty());
}

#[test]
fn test_order_is_preserved() {
    let dataset = Dataset::from_records(
        &[columns::TIME_MS],
        &[&["300"], &["100"], &["300"], &["200"]],
    );
    let (kept, _) = remove_duplicate_timestamps(indexed(&dataset), columns::TIME_MS, None);

    let order: Vec<usize> = kept.iter().map(|(index, _)| *index).collect();
    assert_eq!(order, vec![0, 1, 3]);
}

#[test]
fn test_count_duplicate_timestamps() {
    let dataset = create_duplicate_and_outlier_dataset();
    assert_eq!(count_duplicate_timestamps(dataset.rows(), columns::TIME_MS), 1);

    let clean = create_climb_dataset(4);
    assert_eq!(count_duplicate_timestamps(clean.rows(), columns::TIME_MS), 0);
}
