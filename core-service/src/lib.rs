//! LogLite Core - Kernel Log Anomaly Analysis
//!
//! Classifies single log lines into one of eleven kernel classes by blending a
//! statistical classifier with a weighted keyword scorer, then explains the
//! verdict (affected components, key indicators, root cause, recommendation).
//! Multi-line input is folded into a severity-weighted health report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LOG ANALYZER                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌──────────────────────┐  │
//! │  │  model     │   │  keywords  │   │  components          │  │
//! │  │  (ONNX)    │   │  (tiers)   │   │  (subsystem ranking) │  │
//! │  └─────┬──────┘   └─────┬──────┘   └──────────┬───────────┘  │
//! │        └────────────────┼─────────────────────┘              │
//! │                         ▼                                    │
//! │                ┌─────────────────┐     ┌─────────────────┐   │
//! │                │ analyzer        │ ──▶ │ explain         │   │
//! │                │ (hybrid engine) │     │ (attribution)   │   │
//! │                └────────┬────────┘     └─────────────────┘   │
//! │                         ▼                                    │
//! │                ┌─────────────────┐                           │
//! │                │ batch / report  │                           │
//! │                └─────────────────┘                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{CoreError, CoreResult};
pub use logic::analyzer::{
    AggregateReport, AnalysisResponse, ClassificationResult, HealthStatus, LogAnalyzer,
    SeverityDistribution, TopClassification,
};
pub use logic::config::AnalyzerConfig;
pub use logic::explain::AttributionProvider;
pub use logic::labels::{ClassLabel, LabelRegistry};
pub use logic::model::{LogClassifier, ModelMetadata, OnnxClassifier};
