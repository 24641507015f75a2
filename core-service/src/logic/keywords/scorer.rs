//! Keyword Scorer
//!
//! Input: raw log text. Output: `KeywordScore`.

use serde::{Deserialize, Serialize};

use super::rules::{KeywordRules, ANOMALY_SCORE_THRESHOLD, MAX_KEYWORD_CONFIDENCE};

/// Result of the keyword heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    /// Sum of matched tier weights (one per matched keyword)
    pub anomaly_score: u32,
    pub is_anomaly: bool,
    /// 0 - 95 (percent)
    pub confidence: f64,
    /// Best-guess class id, if the tables imply one
    pub suggested_class: Option<usize>,
}

impl KeywordRules {
    /// Score a log line against the tier and component tables
    pub fn score(&self, text: &str) -> KeywordScore {
        let lower = text.to_lowercase();

        let mut anomaly_score = 0u32;
        let mut max_weight = 0u32;
        let mut detected_class = None;

        for rule in &self.tiers {
            for keyword in &rule.keywords {
                if lower.contains(keyword.as_str()) {
                    log::trace!("Keyword '{}' matched {} tier", keyword, rule.tier.as_str());
                    anomaly_score += rule.weight;
                    // Strict: an earlier tier keeps the slot on equal weight
                    if rule.weight > max_weight {
                        max_weight = rule.weight;
                        detected_class = rule.related_class;
                    }
                }
            }
        }

        if anomaly_score > 0 {
            if let Some((_, class)) = self
                .component_classes
                .iter()
                .find(|(keyword, _)| lower.contains(keyword.as_str()))
            {
                detected_class = Some(*class);
            }
        }

        let is_anomaly = anomaly_score >= ANOMALY_SCORE_THRESHOLD;
        let confidence = if is_anomaly {
            (f64::from(anomaly_score) / 10.0 * 100.0).min(MAX_KEYWORD_CONFIDENCE)
        } else {
            0.0
        };

        KeywordScore {
            anomaly_score,
            is_anomaly,
            confidence,
            suggested_class: detected_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::keywords::{KeywordRule, SeverityTier};
    use crate::logic::labels::{
        CLASS_KERNDTLB, CLASS_KERNIO, CLASS_KERNMEM, CLASS_KERNPANIC, CLASS_KERNSTOR,
    };

    #[test]
    fn test_critical_keywords_suggest_panic() {
        let rules = KeywordRules::default();
        let score = rules.score("kernel panic detected, system crash imminent");

        assert_eq!(score.anomaly_score, 10);
        assert!(score.is_anomaly);
        assert_eq!(score.confidence, 95.0);
        assert_eq!(score.suggested_class, Some(CLASS_KERNPANIC));
    }

    #[test]
    fn test_overlapping_keywords_each_count() {
        let rules = KeywordRules::default();
        // "fail" and "failure" both match
        let score = rules.score("Write FAILURE on device");

        assert_eq!(score.anomaly_score, 8);
        assert!((score.confidence - 80.0).abs() < 1e-9);
        // "write" is no component keyword; error tier has no related class
        assert_eq!(score.suggested_class, None);
    }

    #[test]
    fn test_component_override_takes_first_declared_match() {
        let rules = KeywordRules::default();

        // "disk" and "network" both present: storage pairs come first
        let score = rules.score("network disk error");
        assert_eq!(score.suggested_class, Some(CLASS_KERNSTOR));

        // "memory" beats "tlb" even when tlb appears first in the text
        let score = rules.score("tlb miss, memory error");
        assert_eq!(score.suggested_class, Some(CLASS_KERNMEM));

        let score = rules.score("data TLB error interrupt");
        assert_eq!(score.suggested_class, Some(CLASS_KERNDTLB));

        // Component override also replaces the critical tier's class
        let score = rules.score("panic in network driver");
        assert_eq!(score.suggested_class, Some(CLASS_KERNIO));
    }

    #[test]
    fn test_component_words_alone_do_not_score() {
        let rules = KeywordRules::default();
        let score = rules.score("memory usage at 40%, disk ok");

        assert_eq!(score.anomaly_score, 0);
        assert!(!score.is_anomaly);
        assert_eq!(score.confidence, 0.0);
        assert_eq!(score.suggested_class, None);
    }

    #[test]
    fn test_below_threshold_is_not_anomaly() {
        let rules = KeywordRules::default();
        // One notice keyword: score 2 < 3
        let score = rules.score("packet delay observed");

        assert_eq!(score.anomaly_score, 2);
        assert!(!score.is_anomaly);
        assert_eq!(score.confidence, 0.0);
    }

    #[test]
    fn test_single_warning_reaches_threshold() {
        let rules = KeywordRules::default();
        let score = rules.score("permission denied for /dev/sda");

        assert_eq!(score.anomaly_score, 3);
        assert!(score.is_anomaly);
        assert!((score.confidence - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_names_and_weights() {
        let rules = KeywordRules::default();
        let tiers: Vec<(&str, u32)> = rules.tiers.iter().map(|r| (r.tier.as_str(), r.weight)).collect();
        assert_eq!(
            tiers,
            vec![("critical", 5), ("error", 4), ("warning", 3), ("notice", 2)]
        );
    }

    #[test]
    fn test_equal_weight_keeps_earlier_tier() {
        let rules = KeywordRules {
            tiers: vec![
                KeywordRule::new(SeverityTier::Warning, &["alpha"], Some(3)),
                KeywordRule::new(SeverityTier::Warning, &["beta"], Some(4)),
            ],
            component_classes: Vec::new(),
        };

        let score = rules.score("alpha beta");
        assert_eq!(score.anomaly_score, 6);
        assert_eq!(score.suggested_class, Some(3));
    }
}
