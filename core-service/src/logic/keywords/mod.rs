//! Keywords Module
//!
//! Fixed-point keyword heuristic that runs next to the statistical model.
//! Its tables must stay byte-for-byte stable: the hybrid engine's override
//! rule depends on them.
//!
//! ## Structure
//! - `rules`: Tiers, weights, thresholds and the component → class pairs
//! - `scorer`: Scoring logic

pub mod rules;
pub mod scorer;

pub use rules::{
    KeywordRule,
    KeywordRules,
    SeverityTier,
    ANOMALY_SCORE_THRESHOLD,
    MAX_KEYWORD_CONFIDENCE,
};

pub use scorer::KeywordScore;
