//! Explain Module
//!
//! Turns a verdict into something an operator can act on.
//!
//! ## Structure
//! - `types`: Attribution mode and token contributions
//! - `engine`: Key-indicator attribution (occlusion or keyword fallback)
//! - `narrative`: Root-cause and recommendation templates

pub mod types;
pub mod engine;
pub mod narrative;

pub use types::{AttributionMode, TokenContribution};
pub use engine::{
    AttributionProvider,
    KeywordAttribution,
    OcclusionAttribution,
    MAX_INDICATORS,
    MAX_OCCLUSION_BYTES,
    MAX_OCCLUSION_TOKENS,
    OCCLUSION_CHUNK_ROWS,
};
pub use narrative::{recommendation, root_cause, NO_ACTION_RECOMMENDATION, NO_ANOMALY_ROOT_CAUSE};
