//! Headline figures for a resistance classification

use serde::{Deserialize, Serialize};

use super::classifier::{QualityClassification, QualityTier};

/// Summary of classified resistance readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub predominant_tier: QualityTier,
    pub sample_count: usize,
}

/// Summarise a classification and the readings it was built from
///
/// Mean, minimum and maximum are taken over the readings that received a
/// tier, so negative or non-finite readings do not skew them. Returns `None`
/// when nothing was classified.
pub fn summarize(
    classification: &QualityClassification,
    resistance_values: &[f64],
) -> Option<AirQualitySummary> {
    let predominant_tier = classification.predominant_tier()?;

    let classified: Vec<f64> = resistance_values
        .iter()
        .copied()
        .filter(|value| QualityTier::from_resistance(*value).is_some())
        .collect();
    if classified.is_empty() {
        return None;
    }

    let sample_count = classified.len();
    let mean = classified.iter().sum::<f64>() / sample_count as f64;
    let min = classified.iter().copied().fold(f64::INFINITY, f64::min);
    let max = classified.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(AirQualitySummary {
        mean,
        max,
        min,
        predominant_tier,
        sample_count,
    })
}
