//! Analyzer Module
//!
//! Hybrid decision engine: statistical classifier plus keyword heuristic,
//! explained per line and aggregated per batch.
//!
//! ## Structure
//! - `types`: Result and report data structures (wire shapes)
//! - `engine`: `LogAnalyzer` and the single-line decision
//! - `batch`: Multi-line aggregation and health scoring
//! - `report`: HTTP-facing response envelope

pub mod types;
pub mod engine;
pub mod batch;
pub mod report;


pub use types::{
    AggregateReport,
    ClassificationResult,
    HealthStatus,
    SeverityDistribution,
    TopClassification,
};

pub use engine::LogAnalyzer;
pub use batch::{aggregate, SEVERITY_WEIGHTS};
pub use report::AnalysisResponse;
