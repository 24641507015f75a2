//! Response envelope shared by the single-line and batch paths

use serde::Serialize;

use super::types::{round_to, AggregateReport, ClassificationResult, SeverityDistribution};

const SINGLE_NORMAL_STATUS: &str = "NORMAL";
const SINGLE_ANOMALY_STATUS: &str = "ANOMALY DETECTED";

/// Score lost per severity level on the single-line path
const SINGLE_SEVERITY_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub results: Vec<ClassificationResult>,
    pub health_score: f64,
    pub health_status: String,
    pub severity_distribution: SeverityDistribution,
}

impl AnalysisResponse {
    /// Wrap one result the way a one-line batch is reported
    pub fn single_line(result: ClassificationResult) -> Self {
        let severity = result.severity;
        let health_score = if severity == 0 {
            100.0
        } else {
            (100.0 - f64::from(severity) * SINGLE_SEVERITY_PENALTY).max(0.0)
        };

        let health_status = if result.is_anomaly {
            SINGLE_ANOMALY_STATUS
        } else {
            SINGLE_NORMAL_STATUS
        };

        let mut severity_distribution = SeverityDistribution::default();
        if !result.is_anomaly {
            severity_distribution.normal = 1;
        } else {
            match severity {
                0 | 1 => severity_distribution.low = 1,
                2 | 3 => severity_distribution.medium = 1,
                4 => severity_distribution.high = 1,
                _ => severity_distribution.critical = 1,
            }
        }

        Self {
            results: vec![result],
            health_score,
            health_status: health_status.to_string(),
            severity_distribution,
        }
    }
}

impl From<AggregateReport> for AnalysisResponse {
    fn from(report: AggregateReport) -> Self {
        Self {
            health_score: round_to(report.health_score, 1),
            health_status: report.health_status.message().to_string(),
            severity_distribution: report.severity_distribution,
            results: report.results,
        }
    }
}
