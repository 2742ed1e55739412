//! Complete air-quality assessment of a dataset

use crate::app::models::Dataset;
use crate::constants::columns;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::aggregation::{AltitudeProfile, IntervalSpec, aggregate_by_altitude};
use super::classifier::{QualityClassification, classify};
use super::summary::{AirQualitySummary, summarize};

/// Classification, summary and altitude profile for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityAssessment {
    pub classification: QualityClassification,
    pub summary: Option<AirQualitySummary>,
    pub interval: IntervalSpec,
    pub profile: AltitudeProfile,
}

/// Classify the resistance column of a dataset and build its altitude profile
///
/// Fails with `NoAirQualitySignal` when the resistance column is absent.
pub fn assess(dataset: &Dataset, interval: IntervalSpec) -> Result<AirQualityAssessment> {
    if !dataset.has_column(columns::RESISTANCE) {
        return Err(Error::no_air_quality_signal(columns::RESISTANCE));
    }

    let resistance = dataset.numeric_column(columns::RESISTANCE);
    let classification = classify(&resistance);
    let summary = summarize(&classification, &resistance);
    let profile = aggregate_by_altitude(dataset, interval)?;

    info!(
        "Classified {} of {} resistance readings (profile: {}, {} points)",
        classification.total(),
        resistance.len(),
        interval,
        profile.len()
    );

    Ok(AirQualityAssessment {
        classification,
        summary,
        interval,
        profile,
    })
}
