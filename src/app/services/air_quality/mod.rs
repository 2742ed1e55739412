//! Air-quality classification from gas-sensor resistance
//!
//! Resistance readings (kΩ) are partitioned into five fixed tiers, summarised,
//! and laid out against altitude for the resistance profile chart.
//!
//! # Architecture
//!
//! - [`classifier`] - Quality tiers and the resistance partition
//! - [`summary`] - Mean, range and predominant tier
//! - [`aggregation`] - Altitude pairing and band averaging
//! - [`assessment`] - All of the above for one dataset
//!
//! # Example Usage
//!
//! ```rust
//! use telemetry_processor::app::services::air_quality::{QualityTier, classify, summarize};
//!
//! let readings = [350.0, 250.0, 150.0, 75.0, 10.0];
//! let classification = classify(&readings);
//! let summary = summarize(&classification, &readings).unwrap();
//!
//! assert_eq!(classification.count(QualityTier::Poor), 1);
//! assert_eq!(summary.predominant_tier, QualityTier::Excellent);
//! ```

pub mod aggregation;
pub mod assessment;
pub mod classifier;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregation::{
    AltitudeBucket, AltitudePoint, AltitudeProfile, IntervalSpec, aggregate_by_altitude,
};
pub use assessment::{AirQualityAssessment, assess};
pub use classifier::{QualityClassification, QualityTier, classify};
pub use summary::{AirQualitySummary, summarize};
