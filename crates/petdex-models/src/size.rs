//! Weight-based size classification.

use serde::{Deserialize, Serialize};

use crate::breed::Measurement;

const LBS_TO_KG: f64 = 0.453592;

/// Size bucket derived from a breed's weight range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }
}

/// Outcome of classifying a weight range.
///
/// `Fallback` marks a weight that could not be parsed. It reports the same
/// category as a measured medium so bad upstream data never breaks a
/// listing, but it stays distinguishable for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClassification {
    Measured(SizeCategory),
    Fallback,
}

impl SizeClassification {
    pub fn category(&self) -> SizeCategory {
        match self {
            SizeClassification::Measured(category) => *category,
            SizeClassification::Fallback => SizeCategory::Medium,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SizeClassification::Fallback)
    }
}

/// Classify a weight range into a size bucket.
///
/// The metric low bound wins when present; a metric range that fails to
/// parse falls back without consulting imperial. Only when the metric
/// range is absent is the imperial low bound used, converted at
/// 0.453592 kg/lb. Buckets: < 10 kg small, < 25 kg medium, else large.
pub fn classify_weight(weight: &Measurement) -> SizeClassification {
    let kilograms = if !weight.metric.is_empty() {
        low_bound(&weight.metric)
    } else {
        low_bound(&weight.imperial).map(|pounds| pounds * LBS_TO_KG)
    };

    match kilograms {
        Some(kg) if kg < 10.0 => SizeClassification::Measured(SizeCategory::Small),
        Some(kg) if kg < 25.0 => SizeClassification::Measured(SizeCategory::Medium),
        Some(_) => SizeClassification::Measured(SizeCategory::Large),
        None => SizeClassification::Fallback,
    }
}

/// Parse the number before the first dash of a `"<low> - <high>"` range.
fn low_bound(range: &str) -> Option<f64> {
    range.split('-').next()?.trim().parse().ok()
}
