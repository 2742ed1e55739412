//! Altitude profile of gas resistance
//!
//! Feeds the resistance-versus-altitude chart. Either every reading is paired
//! with its altitude, or readings are grouped into altitude bands and
//! averaged. The dataset is only read.

use crate::app::models::Dataset;
use crate::constants::{ALTITUDE_INTERVAL_ALL, columns};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// How readings are grouped along the altitude axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub enum IntervalSpec {
    /// No aggregation: one point per row
    #[default]
    All,
    /// Bands of the given width in metres
    Width(f64),
}

/// Config representation: the keyword `"all"` or a number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IntervalRepr {
    Width(f64),
    Text(String),
}

impl TryFrom<IntervalRepr> for IntervalSpec {
    type Error = Error;

    fn try_from(repr: IntervalRepr) -> Result<Self> {
        match repr {
            IntervalRepr::Width(width) => IntervalSpec::width(width),
            IntervalRepr::Text(text) => text.parse(),
        }
    }
}

impl From<IntervalSpec> for IntervalRepr {
    fn from(spec: IntervalSpec) -> Self {
        match spec {
            IntervalSpec::All => IntervalRepr::Text(ALTITUDE_INTERVAL_ALL.to_string()),
            IntervalSpec::Width(width) => IntervalRepr::Width(width),
        }
    }
}

impl IntervalSpec {
    /// A banded interval; the width must be finite and positive
    pub fn width(width: f64) -> Result<Self> {
        if width.is_finite() && width > 0.0 {
            Ok(IntervalSpec::Width(width))
        } else {
            Err(Error::data_validation(format!(
                "Altitude interval must be a positive number of metres, got {}",
                width
            )))
        }
    }
}

impl FromStr for IntervalSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALTITUDE_INTERVAL_ALL) {
            return Ok(IntervalSpec::All);
        }

        let width = trimmed.parse::<f64>().map_err(|_| {
            Error::data_validation(format!(
                "Altitude interval must be '{}' or a positive number, got '{}'",
                ALTITUDE_INTERVAL_ALL, s
            ))
        })?;
        IntervalSpec::width(width)
    }
}

impl std::fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalSpec::All => f.write_str(ALTITUDE_INTERVAL_ALL),
            IntervalSpec::Width(width) => write!(f, "{} m", width),
        }
    }
}

/// One resistance reading at its altitude (or row index)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudePoint {
    pub altitude: f64,
    pub resistance: f64,
}

/// Mean resistance over one altitude band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeBucket {
    /// Lower edge of the band
    pub band_start: f64,
    /// Mean altitude of the members
    pub altitude: f64,
    /// Mean resistance of the members
    pub resistance: f64,
    pub count: usize,
}

/// Output of [`aggregate_by_altitude`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "points", rename_all = "lowercase")]
pub enum AltitudeProfile {
    Raw(Vec<AltitudePoint>),
    Bucketed(Vec<AltitudeBucket>),
}

impl AltitudeProfile {
    pub fn len(&self) -> usize {
        match self {
            AltitudeProfile::Raw(points) => points.len(),
            AltitudeProfile::Bucketed(buckets) => buckets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pair resistance readings with altitude, optionally grouped into bands
///
/// When the dataset has no altitude column, each row's ordinal index stands
/// in for its altitude. Rows whose resistance is not numeric are skipped, as
/// are rows whose altitude cell is not numeric.
///
/// Bands are keyed by `floor(altitude / width) * width` and returned in
/// ascending altitude order.
pub fn aggregate_by_altitude(dataset: &Dataset, interval: IntervalSpec) -> Result<AltitudeProfile> {
    if !dataset.has_column(columns::RESISTANCE) {
        return Err(Error::no_air_quality_signal(columns::RESISTANCE));
    }

    let has_altitude = dataset.has_column(columns::ALTITUDE);
    if !has_altitude {
        debug!(
            "Column '{}' not found; using row index as altitude coordinate",
            columns::ALTITUDE
        );
    }

    let points: Vec<AltitudePoint> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let resistance = row.numeric(columns::RESISTANCE)?;
            let altitude = if has_altitude {
                row.numeric(columns::ALTITUDE)?
            } else {
                index as f64
            };
            Some(AltitudePoint {
                altitude,
                resistance,
            })
        })
        .collect();

    match interval {
        IntervalSpec::All => Ok(AltitudeProfile::Raw(points)),
        IntervalSpec::Width(width) => Ok(AltitudeProfile::Bucketed(bucket_points(
            &points, width,
        ))),
    }
}

/// Floored band index, kept as `f64` so very small widths cannot saturate it
#[derive(Debug, Clone, Copy)]
struct BandKey(f64);

impl BandKey {
    fn of(altitude: f64, width: f64) -> Self {
        // `+ 0.0` folds -0.0 into the 0.0 band
        BandKey((altitude / width).floor() + 0.0)
    }
}

impl PartialEq for BandKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BandKey {}

impl PartialOrd for BandKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BandKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Group points into bands of the given width
fn bucket_points(points: &[AltitudePoint], width: f64) -> Vec<AltitudeBucket> {
    // band index -> (altitude sum, resistance sum, count)
    let mut bands: BTreeMap<BandKey, (f64, f64, usize)> = BTreeMap::new();

    for point in points {
        let band = BandKey::of(point.altitude, width);
        let entry = bands.entry(band).or_insert((0.0, 0.0, 0));
        entry.0 += point.altitude;
        entry.1 += point.resistance;
        entry.2 += 1;
    }

    debug!(
        "Grouped {} readings into {} bands of {} m",
        points.len(),
        bands.len(),
        width
    );

    bands
        .into_iter()
        .map(|(band, (altitude_sum, resistance_sum, count))| AltitudeBucket {
            band_start: band.0 * width,
            altitude: altitude_sum / count as f64,
            resistance: resistance_sum / count as f64,
            count,
        })
        .collect()
}
