//! Tests for altitude pairing, banding and interval parsing

use super::*;
use crate::Error;
use crate::app::services::air_quality::{AltitudeProfile, IntervalSpec, aggregate_by_altitude};

#[test]
fn test_all_keeps_row_order_and_pairing() {
    let dataset = Dataset::from_records(
        &[columns::RESISTANCE, columns::ALTITUDE],
        &[&["120", "30"], &["80", "10"], &["310", "20"]],
    );

    let profile = aggregate_by_altitude(&dataset, IntervalSpec::All).unwrap();
    let AltitudeProfile::Raw(points) = profile else {
        panic!("expected raw profile");
    };

    assert_eq!(points.len(), 3);
    assert_eq!((points[0].altitude, points[0].resistance), (30.0, 120.0));
    assert_eq!((points[1].altitude, points[1].resistance), (10.0, 80.0));
    assert_eq!((points[2].altitude, points[2].resistance), (20.0, 310.0));
}

#[test]
fn test_row_index_when_altitude_missing() {
    let dataset = create_resistance_only_dataset(&["100", "200", "300"]);

    let AltitudeProfile::Raw(points) = aggregate_by_altitude(&dataset, IntervalSpec::All).unwrap()
    else {
        panic!("expected raw profile");
    };
    let altitudes: Vec<f64> = points.iter().map(|p| p.altitude).collect();
    assert_eq!(altitudes, vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_non_numeric_rows_skipped() {
    let dataset = Dataset::from_records(
        &[columns::RESISTANCE, columns::ALTITUDE],
        &[&["120", "30"], &["n/a", "40"], &["90", ""], &["70", "50"]],
    );

    let profile = aggregate_by_altitude(&dataset, IntervalSpec::All).unwrap();
    assert_eq!(profile.len(), 2);
}

#[test]
fn test_bands_sorted_and_averaged() {
    let dataset = Dataset::from_records(
        &[columns::RESISTANCE, columns::ALTITUDE],
        &[&["300", "120"], &["100", "10"], &["200", "140"], &["50", "-5"]],
    );

    let profile = aggregate_by_altitude(&dataset, IntervalSpec::Width(100.0)).unwrap();
    let AltitudeProfile::Bucketed(buckets) = profile else {
        panic!("expected bucketed profile");
    };

    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].band_start, -100.0);
    assert_eq!(buckets[0].count, 1);

    assert_eq!(buckets[1].band_start, 0.0);
    assert_eq!(buckets[1].resistance, 100.0);

    assert_eq!(buckets[2].band_start, 100.0);
    assert_eq!(buckets[2].count, 2);
    assert_eq!(buckets[2].altitude, 130.0);
    assert_eq!(buckets[2].resistance, 250.0);
}

#[test]
fn test_tiny_width_keeps_distinct_bands() {
    let dataset = Dataset::from_records(
        &[columns::RESISTANCE, columns::ALTITUDE],
        &[&["100", "20000"], &["300", "10000"]],
    );

    let profile = aggregate_by_altitude(&dataset, IntervalSpec::Width(1e-16)).unwrap();
    let AltitudeProfile::Bucketed(buckets) = profile else {
        panic!("expected bucketed profile");
    };

    assert_eq!(buckets.len(), 2);
    assert_eq!((buckets[0].altitude, buckets[0].count), (10000.0, 1));
    assert_eq!((buckets[1].altitude, buckets[1].count), (20000.0, 1));
    assert!((buckets[0].band_start - 10000.0).abs() < 1e-6);
    assert!((buckets[1].band_start - 20000.0).abs() < 1e-6);
}

#[test]
fn test_negative_zero_shares_zero_band() {
    let dataset = Dataset::from_records(
        &[columns::RESISTANCE, columns::ALTITUDE],
        &[&["100", "-0.0"], &["300", "0"]],
    );

    let AltitudeProfile::Bucketed(buckets) =
        aggregate_by_altitude(&dataset, IntervalSpec::Width(10.0)).unwrap()
    else {
        panic!("expected bucketed profile");
    };

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[0].resistance, 200.0);
}

#[test]
fn test_aggregation_leaves_dataset_untouched() {
    let dataset = create_tiered_dataset();
    let before = dataset.clone();

    aggregate_by_altitude(&dataset, IntervalSpec::Width(250.0)).unwrap();
    assert_eq!(dataset, before);
}

#[test]
fn test_missing_resistance_column() {
    let dataset = Dataset::from_records(&[columns::ALTITUDE], &[&["10"]]);
    let err = aggregate_by_altitude(&dataset, IntervalSpec::All).unwrap_err();
    assert!(matches!(err, Error::NoAirQualitySignal { .. }));
}

#[test]
fn test_interval_parsing() {
    assert_eq!("all".parse::<IntervalSpec>().unwrap(), IntervalSpec::All);
    assert_eq!(" ALL ".parse::<IntervalSpec>().unwrap(), IntervalSpec::All);
    assert_eq!("50".parse::<IntervalSpec>().unwrap(), IntervalSpec::Width(50.0));

    assert!("0".parse::<IntervalSpec>().is_err());
    assert!("-10".parse::<IntervalSpec>().is_err());
    assert!("wide".parse::<IntervalSpec>().is_err());
    assert!("inf".parse::<IntervalSpec>().is_err());
}

#[test]
fn test_interval_serde_forms() {
    #[derive(serde::Deserialize)]
    struct Holder {
        interval: IntervalSpec,
    }

    let numeric: Holder = toml::from_str("interval = 50.0").unwrap();
    assert_eq!(numeric.interval, IntervalSpec::Width(50.0));

    let keyword: Holder = toml::from_str("interval = \"all\"").unwrap();
    assert_eq!(keyword.interval, IntervalSpec::All);

    assert!(toml::from_str::<Holder>("interval = -3.0").is_err());
}
