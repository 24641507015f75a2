//! Keyword Rules & Thresholds
//!
//! Constants and tables only - no scoring logic.

use serde::{Deserialize, Serialize};

use crate::logic::labels::{
    CLASS_KERNDTLB, CLASS_KERNIO, CLASS_KERNMEM, CLASS_KERNPANIC, CLASS_KERNSQLA,
    CLASS_KERNSTACK, CLASS_KERNSTOR,
};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Anomaly score at or above which a line counts as anomalous
pub const ANOMALY_SCORE_THRESHOLD: u32 = 3;

/// Cap on keyword confidence (percent)
pub const MAX_KEYWORD_CONFIDENCE: f64 = 95.0;

// ============================================================================
// TIER TABLES
// ============================================================================

const CRITICAL_KEYWORDS: &[&str] = &["panic", "fatal", "crash", "segfault", "deadlock"];
const ERROR_KEYWORDS: &[&str] = &["error", "fail", "failure", "corrupt", "exception"];
const WARNING_KEYWORDS: &[&str] = &["warn", "warning", "denied", "unable", "cannot", "timeout"];
const NOTICE_KEYWORDS: &[&str] = &["notice", "retry", "delay", "lost", "attempt"];

/// Component keyword → class, scanned in this exact order; first hit wins
const COMPONENT_CLASSES: &[(&str, usize)] = &[
    ("memory", CLASS_KERNMEM),
    ("tlb", CLASS_KERNDTLB),
    ("storage", CLASS_KERNSTOR),
    ("disk", CLASS_KERNSTOR),
    ("io", CLASS_KERNIO),
    ("network", CLASS_KERNIO),
    ("sql", CLASS_KERNSQLA),
    ("stack", CLASS_KERNSTACK),
];

// ============================================================================
// SEVERITY TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Critical,
    Error,
    Warning,
    Notice,
}

impl SeverityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "critical",
            SeverityTier::Error => "error",
            SeverityTier::Warning => "warning",
            SeverityTier::Notice => "notice",
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            SeverityTier::Critical => 5,
            SeverityTier::Error => 4,
            SeverityTier::Warning => 3,
            SeverityTier::Notice => 2,
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

/// One severity tier of keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub tier: SeverityTier,
    /// Lowercase substrings
    pub keywords: Vec<String>,
    pub weight: u32,
    /// Class suggested when this tier carries the highest weight
    pub related_class: Option<usize>,
}

impl KeywordRule {
    pub fn new(tier: SeverityTier, keywords: &[&str], related_class: Option<usize>) -> Self {
        Self {
            tier,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight: tier.weight(),
            related_class,
        }
    }
}

/// Complete keyword table (tiers + ordered component classes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRules {
    /// Evaluated in order; earlier tiers win ties on weight
    pub tiers: Vec<KeywordRule>,
    /// Ordered (keyword, class id) pairs
    pub component_classes: Vec<(String, usize)>,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            tiers: vec![
                KeywordRule::new(SeverityTier::Critical, CRITICAL_KEYWORDS, Some(CLASS_KERNPANIC)),
                KeywordRule::new(SeverityTier::Error, ERROR_KEYWORDS, None),
                KeywordRule::new(SeverityTier::Warning, WARNING_KEYWORDS, None),
                KeywordRule::new(SeverityTier::Notice, NOTICE_KEYWORDS, None),
            ],
            component_classes: COMPONENT_CLASSES
                .iter()
                .map(|(keyword, class)| (keyword.to_string(), *class))
                .collect(),
        }
    }
}
