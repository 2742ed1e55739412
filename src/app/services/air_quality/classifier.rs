//! Air-quality tiers derived from gas-sensor resistance
//!
//! Higher resistance on a metal-oxide gas sensor means fewer reducing gases
//! (VOCs) in the air. Readings in kΩ map to five fixed tiers.

use crate::constants::air_quality_thresholds as thresholds;
use serde::{Deserialize, Serialize};

/// Air-quality tier, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityTier {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl QualityTier {
    /// All tiers in table order, which is also the tie-break order
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Excellent,
        QualityTier::Good,
        QualityTier::Moderate,
        QualityTier::Poor,
        QualityTier::VeryPoor,
    ];

    /// Tier for a resistance reading in kΩ
    ///
    /// Negative and non-finite readings have no tier.
    pub fn from_resistance(resistance: f64) -> Option<Self> {
        if !resistance.is_finite() || resistance < thresholds::VERY_POOR {
            return None;
        }

        let tier = if resistance >= thresholds::EXCELLENT {
            QualityTier::Excellent
        } else if resistance >= thresholds::GOOD {
            QualityTier::Good
        } else if resistance >= thresholds::MODERATE {
            QualityTier::Moderate
        } else if resistance >= thresholds::POOR {
            QualityTier::Poor
        } else {
            QualityTier::VeryPoor
        };
        Some(tier)
    }

    /// Inclusive lower bound and exclusive upper bound (open-ended for the top tier)
    pub fn range(&self) -> (f64, Option<f64>) {
        match self {
            QualityTier::Excellent => (thresholds::EXCELLENT, None),
            QualityTier::Good => (thresholds::GOOD, Some(thresholds::EXCELLENT)),
            QualityTier::Moderate => (thresholds::MODERATE, Some(thresholds::GOOD)),
            QualityTier::Poor => (thresholds::POOR, Some(thresholds::MODERATE)),
            QualityTier::VeryPoor => (thresholds::VERY_POOR, Some(thresholds::POOR)),
        }
    }

    /// Identifier used in reports
    pub fn key(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "excellent",
            QualityTier::Good => "good",
            QualityTier::Moderate => "moderate",
            QualityTier::Poor => "poor",
            QualityTier::VeryPoor => "veryPoor",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "Excellent",
            QualityTier::Good => "Good",
            QualityTier::Moderate => "Moderate",
            QualityTier::Poor => "Poor",
            QualityTier::VeryPoor => "Very poor",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Resistance readings partitioned by tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityClassification {
    pub excellent: Vec<f64>,
    pub good: Vec<f64>,
    pub moderate: Vec<f64>,
    pub poor: Vec<f64>,
    pub very_poor: Vec<f64>,
}

impl QualityClassification {
    /// Readings in one tier, in input order
    pub fn values(&self, tier: QualityTier) -> &[f64] {
        match tier {
            QualityTier::Excellent => &self.excellent,
            QualityTier::Good => &self.good,
            QualityTier::Moderate => &self.moderate,
            QualityTier::Poor => &self.poor,
            QualityTier::VeryPoor => &self.very_poor,
        }
    }

    fn values_mut(&mut self, tier: QualityTier) -> &mut Vec<f64> {
        match tier {
            QualityTier::Excellent => &mut self.excellent,
            QualityTier::Good => &mut self.good,
            QualityTier::Moderate => &mut self.moderate,
            QualityTier::Poor => &mut self.poor,
            QualityTier::VeryPoor => &mut self.very_poor,
        }
    }

    pub fn count(&self, tier: QualityTier) -> usize {
        self.values(tier).len()
    }

    /// Number of classified readings across all tiers
    pub fn total(&self) -> usize {
        QualityTier::ALL.iter().map(|tier| self.count(*tier)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Tiers with their readings, in table order
    pub fn iter(&self) -> impl Iterator<Item = (QualityTier, &[f64])> + '_ {
        QualityTier::ALL.into_iter().map(move |tier| (tier, self.values(tier)))
    }

    /// Share of classified readings in a tier, as a percentage
    pub fn percentage(&self, tier: QualityTier) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.count(tier) as f64 / total as f64) * 100.0
        }
    }

    /// Tier with the most readings; ties go to the earliest tier in table order
    pub fn predominant_tier(&self) -> Option<QualityTier> {
        let mut best: Option<(QualityTier, usize)> = None;
        for tier in QualityTier::ALL {
            let count = self.count(tier);
            if count > best.map_or(0, |(_, best_count)| best_count) {
                best = Some((tier, count));
            }
        }
        best.map(|(tier, _)| tier)
    }
}

/// Partition resistance readings into quality tiers
///
/// Every finite, non-negative reading lands in exactly one tier; other
/// readings are left out.
pub fn classify(resistance_values: &[f64]) -> QualityClassification {
    let mut classification = QualityClassification::default();

    for &value in resistance_values {
        if let Some(tier) = QualityTier::from_resistance(value) {
            classification.values_mut(tier).push(value);
        }
    }

    classification
}
