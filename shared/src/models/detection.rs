//! Detection labels, normalization, and per-box results

use serde::{Deserialize, Serialize};

use crate::models::WeatherObservation;
use crate::types::RiskTier;

/// One labeled box returned by the detection capability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedBox {
    pub label: String,
    pub confidence: f32,
}

/// Symptom severity encoded in the second label segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    /// Labels without a severity segment fall into this bucket
    #[default]
    Default,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Default => "default",
        }
    }

    fn from_segment(segment: &str) -> Option<Severity> {
        match segment {
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "severe" => Some(Severity::Severe),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The (disease, severity) decomposition of a detection label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    pub severity: Severity,
}

/// Split a raw model label into a disease name and severity.
///
/// Labels follow a flat `disease_severity` convention; only the first two
/// underscore-separated segments are inspected. A label whose second segment
/// is not a recognized severity is kept whole as the disease name.
pub fn normalize_label(raw_label: &str) -> Diagnosis {
    let mut segments = raw_label.splitn(3, '_');
    let first = segments.next().unwrap_or(raw_label);
    match segments.next().and_then(Severity::from_segment) {
        Some(severity) => Diagnosis {
            disease: first.to_string(),
            severity,
        },
        None => Diagnosis {
            disease: raw_label.to_string(),
            severity: Severity::Default,
        },
    }
}

/// Fully-resolved result for one detected box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionResult {
    pub class_name: String,
    /// Confidence as a truncated integer percentage
    pub confidence_percent: i32,
    pub recommendation: String,
    pub risk: RiskTier,
    pub weather: Option<WeatherObservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnosis(disease: &str, severity: Severity) -> Diagnosis {
        Diagnosis {
            disease: disease.to_string(),
            severity,
        }
    }

    #[test]
    fn test_label_with_severity_segment() {
        assert_eq!(
            normalize_label("blight_severe"),
            diagnosis("blight", Severity::Severe)
        );
        assert_eq!(
            normalize_label("wcwld_mild"),
            diagnosis("wcwld", Severity::Mild)
        );
    }

    #[test]
    fn test_bare_label_defaults_severity() {
        assert_eq!(
            normalize_label("blight"),
            diagnosis("blight", Severity::Default)
        );
    }

    #[test]
    fn test_unrecognized_second_segment_keeps_label_whole() {
        assert_eq!(
            normalize_label("blight_foo"),
            diagnosis("blight_foo", Severity::Default)
        );
        assert_eq!(
            normalize_label("caterpillar_infestation"),
            diagnosis("caterpillar_infestation", Severity::Default)
        );
    }

    #[test]
    fn test_only_first_two_segments_inspected() {
        assert_eq!(
            normalize_label("wcwld_moderate_left"),
            diagnosis("wcwld", Severity::Moderate)
        );
        assert_eq!(
            normalize_label("wcwld_left_moderate"),
            diagnosis("wcwld_left_moderate", Severity::Default)
        );
    }
}
