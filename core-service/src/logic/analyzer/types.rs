//! Analyzer Types
//!
//! Data structures only - decision logic lives in `engine` and `batch`.

use serde::{Serialize, Serializer};

use crate::logic::labels::ClassLabel;

// ============================================================================
// SINGLE LINE
// ============================================================================

/// One (class, probability) pair of the final distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopClassification {
    #[serde(rename = "type")]
    pub class_name: String,
    /// 0.0 - 1.0; serialized as a percentage
    #[serde(serialize_with = "serialize_percent")]
    pub probability: f64,
}

/// Verdict and explanation for one log line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    #[serde(rename = "log")]
    pub log_text: String,

    #[serde(rename = "prediction", serialize_with = "serialize_class_name")]
    pub predicted_class: ClassLabel,

    pub is_anomaly: bool,

    /// 0 - 100
    #[serde(serialize_with = "serialize_2dp")]
    pub confidence: f64,

    pub severity: u8,

    /// Ranked by keyword hits, never empty
    pub affected_components: Vec<String>,

    pub root_cause: String,
    pub recommendation: String,

    /// At most three tokens
    pub key_indicators: Vec<String>,

    /// At most three, probability descending
    pub top_classifications: Vec<TopClassification>,
}

// ============================================================================
// BATCH
// ============================================================================

/// Health band of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Excellent,
    Stable,
    Caution,
    Alert,
}

impl HealthStatus {
    /// ≥90 EXCELLENT, ≥75 STABLE, ≥50 CAUTION, else ALERT
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            HealthStatus::Excellent
        } else if score >= 75.0 {
            HealthStatus::Stable
        } else if score >= 50.0 {
            HealthStatus::Caution
        } else {
            HealthStatus::Alert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "EXCELLENT",
            HealthStatus::Stable => "STABLE",
            HealthStatus::Caution => "CAUTION",
            HealthStatus::Alert => "ALERT",
        }
    }

    /// Operator-facing sentence, prefixed with the band name
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => {
                "EXCELLENT: System operating normally with minimal anomalies."
            }
            HealthStatus::Stable => {
                "STABLE: System operating within normal parameters. Routine monitoring advised."
            }
            HealthStatus::Caution => {
                "CAUTION: Multiple anomalies detected. Increased monitoring recommended."
            }
            HealthStatus::Alert => {
                "ALERT: System health critical. Immediate investigation required."
            }
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for HealthStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Line counts per severity bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityDistribution {
    /// Severity 0
    pub normal: usize,
    /// Severity 1
    pub low: usize,
    /// Severity 2 and 3
    pub medium: usize,
    /// Severity 4
    pub high: usize,
    /// Severity 5
    pub critical: usize,
}

impl SeverityDistribution {
    /// Fold per-severity counts (index = severity) into buckets
    pub fn from_counts(counts: &[usize; 6]) -> Self {
        Self {
            normal: counts[0],
            low: counts[1],
            medium: counts[2] + counts[3],
            high: counts[4],
            critical: counts[5],
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.low + self.medium + self.high + self.critical
    }
}

/// Batch verdict, derived entirely from `results`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub results: Vec<ClassificationResult>,
    /// 0 - 100
    #[serde(serialize_with = "serialize_1dp")]
    pub health_score: f64,
    pub health_status: HealthStatus,
    pub severity_distribution: SeverityDistribution,
}

// ============================================================================
// SERDE HELPERS
// ============================================================================

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn serialize_class_name<S: Serializer>(label: &ClassLabel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&label.name)
}

fn serialize_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(value * 100.0, 2))
}

fn serialize_2dp<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

fn serialize_1dp<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthStatus::from_score(100.0), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(90.0), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(89.9), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(75.0), HealthStatus::Stable);
        assert_eq!(HealthStatus::from_score(55.0), HealthStatus::Caution);
        assert_eq!(HealthStatus::from_score(50.0), HealthStatus::Caution);
        assert_eq!(HealthStatus::from_score(49.99), HealthStatus::Alert);
    }

    #[test]
    fn test_status_serializes_as_sentence() {
        let json = serde_json::to_value(HealthStatus::Caution).unwrap();
        assert_eq!(
            json,
            "CAUTION: Multiple anomalies detected. Increased monitoring recommended."
        );
        assert!(HealthStatus::Alert.message().starts_with(HealthStatus::Alert.as_str()));
    }

    #[test]
    fn test_result_wire_shape() {
        let result = ClassificationResult {
            log_text: "disk error".to_string(),
            predicted_class: ClassLabel::new(5, "KERNSTOR", 3),
            is_anomaly: true,
            confidence: 87.456,
            severity: 3,
            affected_components: vec!["storage".to_string()],
            root_cause: "cause".to_string(),
            recommendation: "advice".to_string(),
            key_indicators: vec!["error".to_string()],
            top_classifications: vec![TopClassification {
                class_name: "KERNSTOR".to_string(),
                probability: 0.874561,
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["log"], "disk error");
        assert_eq!(json["prediction"], "KERNSTOR");
        assert_eq!(json["confidence"], 87.46);
        assert_eq!(json["top_classifications"][0]["type"], "KERNSTOR");
        assert_eq!(json["top_classifications"][0]["probability"], 87.46);
        assert!(json.get("log_text").is_none());
    }

    #[test]
    fn test_distribution_buckets() {
        let dist = SeverityDistribution::from_counts(&[4, 1, 2, 3, 0, 1]);
        assert_eq!(dist.medium, 5);
        assert_eq!(dist.total(), 11);
    }
}
