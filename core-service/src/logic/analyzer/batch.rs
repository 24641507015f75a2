//! Batch Aggregation
//!
//! Multi-line text → per-line results + severity-weighted health score.

use super::engine::LogAnalyzer;
use super::types::{AggregateReport, ClassificationResult, HealthStatus, SeverityDistribution};
use crate::error::CoreResult;

/// Health contribution of one line, indexed by severity
pub const SEVERITY_WEIGHTS: [f64; 6] = [1.0, 0.9, 0.7, 0.4, 0.2, 0.1];

/// Score of an empty batch
const EMPTY_BATCH_SCORE: f64 = 100.0;

impl LogAnalyzer {
    /// Analyze every non-blank line in input order
    pub fn analyze_batch(&self, text: &str) -> CoreResult<AggregateReport> {
        let results = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.analyze_line(line))
            .collect::<CoreResult<Vec<_>>>()?;

        log::debug!("Analyzed batch of {} lines", results.len());
        Ok(aggregate(results))
    }
}

/// Fold per-line results into a report
pub fn aggregate(results: Vec<ClassificationResult>) -> AggregateReport {
    let mut counts = [0usize; 6];
    for result in &results {
        counts[usize::from(result.severity.min(5))] += 1;
    }

    let health_score = if results.is_empty() {
        EMPTY_BATCH_SCORE
    } else {
        let weighted: f64 = counts
            .iter()
            .zip(SEVERITY_WEIGHTS)
            .map(|(count, weight)| *count as f64 * weight)
            .sum();
        weighted / results.len() as f64 * 100.0
    };

    AggregateReport {
        health_status: HealthStatus::from_score(health_score),
        severity_distribution: SeverityDistribution::from_counts(&counts),
        health_score,
        results,
    }
}
