use std::collections::{HashMap, HashSet};

use super::types::{AttributionMode, TokenContribution};
use crate::error::{CoreError, CoreResult};
use crate::logic::model::LogClassifier;

/// Most key indicators reported per line
pub const MAX_INDICATORS: usize = 3;

// Indicator tiers for the keyword fallback (substring match, scores 3/2/1)
const HIGH_IMPORTANCE: &[&str] = &["error", "fail", "crash", "exception", "panic", "corrupt"];
const MEDIUM_IMPORTANCE: &[&str] = &["warning", "interrupt", "memory", "disk", "network", "timeout"];
const LOW_IMPORTANCE: &[&str] = &["process", "terminated", "overflow", "retry", "delay"];

/// Tokens occluded per line; later tokens fall outside the window
pub const MAX_OCCLUSION_TOKENS: usize = 128;

/// Byte cap on the occlusion window; larger windows use the keyword fallback
pub const MAX_OCCLUSION_BYTES: usize = 8 * 1024;

/// Occluded variants per classifier call
pub const OCCLUSION_CHUNK_ROWS: usize = 32;

/// Frequency fallback ignores tokens this short or shorter
const MIN_FREQUENT_TOKEN_CHARS: usize = 3;

// ============================================================================
// PROVIDER
// ============================================================================

/// Key-indicator attribution, chosen once at startup.
///
/// The keyword fallback is always reachable: a failing native call degrades
/// to it for that call only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionProvider {
    Native(OcclusionAttribution),
    Fallback(KeywordAttribution),
}

impl AttributionProvider {
    pub fn select(native_available: bool) -> Self {
        if native_available {
            AttributionProvider::Native(OcclusionAttribution)
        } else {
            AttributionProvider::Fallback(KeywordAttribution)
        }
    }

    pub fn mode(&self) -> AttributionMode {
        match self {
            AttributionProvider::Native(_) => AttributionMode::Occlusion,
            AttributionProvider::Fallback(_) => AttributionMode::Keyword,
        }
    }

    /// Up to three indicator tokens for `text`.
    ///
    /// `prediction` is the unmodified model distribution for `text`.
    pub fn key_indicators(
        &self,
        text: &str,
        classifier: &dyn LogClassifier,
        prediction: &[f64],
    ) -> Vec<String> {
        match self {
            AttributionProvider::Native(native) => {
                match native.explain(text, classifier, prediction) {
                    Ok(indicators) => indicators,
                    Err(e) => {
                        log::warn!("Occlusion attribution failed: {}, falling back to keyword extraction", e);
                        KeywordAttribution.explain(text)
                    }
                }
            }
            AttributionProvider::Fallback(fallback) => fallback.explain(text),
        }
    }
}

impl Default for AttributionProvider {
    fn default() -> Self {
        AttributionProvider::Fallback(KeywordAttribution)
    }
}

// ============================================================================
// NATIVE: OCCLUSION
// ============================================================================

/// Leave-one-token-out attribution against the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OcclusionAttribution;

impl OcclusionAttribution {
    pub fn explain(
        &self,
        text: &str,
        classifier: &dyn LogClassifier,
        prediction: &[f64],
    ) -> CoreResult<Vec<String>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() <= MAX_INDICATORS {
            return Ok(tokens.into_iter().map(str::to_string).collect());
        }

        let mut contributions = self.contributions(&tokens, classifier, prediction)?;

        // Sort by importance DESC, earlier token first on ties
        contributions.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });

        Ok(contributions
            .into_iter()
            .take(MAX_INDICATORS)
            .map(|c| c.token)
            .collect())
    }

    /// Importance of every token in the occlusion window.
    ///
    /// Only the first `MAX_OCCLUSION_TOKENS` tokens are occluded, in batches of
    /// at most `OCCLUSION_CHUNK_ROWS`. A truncated window is scored against its
    /// own distribution rather than the full line's.
    pub fn contributions(
        &self,
        tokens: &[&str],
        classifier: &dyn LogClassifier,
        prediction: &[f64],
    ) -> CoreResult<Vec<TokenContribution>> {
        let window = &tokens[..tokens.len().min(MAX_OCCLUSION_TOKENS)];
        let window_bytes: usize = window.iter().map(|t| t.len() + 1).sum();
        if window_bytes > MAX_OCCLUSION_BYTES {
            return Err(CoreError::Inference(format!(
                "occlusion window of {} bytes exceeds {}",
                window_bytes, MAX_OCCLUSION_BYTES
            )));
        }

        let rebased;
        let baseline: &[f64] = if window.len() < tokens.len() {
            rebased = classifier.classify(&window.join(" "))?;
            &rebased
        } else {
            prediction
        };

        let mut contributions = Vec::with_capacity(window.len());
        for chunk_start in (0..window.len()).step_by(OCCLUSION_CHUNK_ROWS) {
            let chunk_end = (chunk_start + OCCLUSION_CHUNK_ROWS).min(window.len());
            let occluded: Vec<String> = (chunk_start..chunk_end)
                .map(|skip| occlude(window, skip))
                .collect();
            let batch: Vec<&str> = occluded.iter().map(String::as_str).collect();

            let distributions = classifier.classify_batch(&batch)?;
            if distributions.len() != batch.len() {
                return Err(CoreError::Inference(format!(
                    "occlusion expected {} distributions, got {}",
                    batch.len(),
                    distributions.len()
                )));
            }

            for (position, dist) in (chunk_start..chunk_end).zip(distributions) {
                contributions.push(TokenContribution {
                    token: window[position].to_string(),
                    position,
                    importance: importance(&dist, baseline)?,
                });
            }
        }

        Ok(contributions)
    }
}

/// `tokens` joined by spaces, without the one at `skip`
fn occlude(tokens: &[&str], skip: usize) -> String {
    tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean absolute change between two distributions
fn importance(dist: &[f64], baseline: &[f64]) -> CoreResult<f64> {
    if dist.len() != baseline.len() || dist.is_empty() {
        return Err(CoreError::Inference(format!(
            "occlusion distribution has {} classes, expected {}",
            dist.len(),
            baseline.len()
        )));
    }

    let total: f64 = dist.iter().zip(baseline).map(|(p, base)| (p - base).abs()).sum();
    Ok(total / dist.len() as f64)
}

// ============================================================================
// FALLBACK: KEYWORD TIERS
// ============================================================================

/// Deterministic tier-scored keyword extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordAttribution;

impl KeywordAttribution {
    pub fn explain(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();

        // Distinct tokens with their tier score, first-seen order
        let mut seen: HashSet<&str> = HashSet::new();
        let mut scored: Vec<(&str, u8)> = Vec::new();
        for token in tokens.iter().copied() {
            if !seen.insert(token) {
                continue;
            }
            let score = token_score(token);
            if score > 0 {
                scored.push((token, score));
            }
        }

        if scored.is_empty() {
            return most_frequent_tokens(&tokens);
        }

        // Stable: equal scores keep first-seen order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
            .into_iter()
            .take(MAX_INDICATORS)
            .map(|(token, _)| token.to_string())
            .collect()
    }
}

fn token_score(token: &str) -> u8 {
    let tier_hit = |words: &[&str]| words.iter().any(|w| token.contains(*w));

    if tier_hit(HIGH_IMPORTANCE) {
        3
    } else if tier_hit(MEDIUM_IMPORTANCE) {
        2
    } else if tier_hit(LOW_IMPORTANCE) {
        1
    } else {
        0
    }
}

/// The most frequent long tokens, ties broken by first appearance
fn most_frequent_tokens(tokens: &[&str]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for token in tokens
        .iter()
        .copied()
        .filter(|t| t.chars().count() > MIN_FREQUENT_TOKEN_CHARS)
    {
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort over first-seen order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(MAX_INDICATORS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_tiers_rank_high_first() {
        let indicators = KeywordAttribution.explain("Process terminated after memory error");
        assert_eq!(indicators, vec!["error", "memory", "process"]);
    }

    #[test]
    fn test_keyword_substring_match_and_distinct() {
        let indicators = KeywordAttribution.explain("FAILED failed disk-timeout retrying");
        // "failed" once (distinct), "disk-timeout" medium, "retrying" low
        assert_eq!(indicators, vec!["failed", "disk-timeout", "retrying"]);
    }

    #[test]
    fn test_keyword_caps_at_three() {
        let indicators = KeywordAttribution.explain("error crash panic exception corrupt");
        assert_eq!(indicators, vec!["error", "crash", "panic"]);
    }

    #[test]
    fn test_frequency_fallback() {
        let indicators =
            KeywordAttribution.explain("ntpd sync with peer done, peer stratum sync ok, peer");
        // peer x3, sync x2, then first-seen among the rest
        assert_eq!(indicators, vec!["peer", "sync", "ntpd"]);
    }

    #[test]
    fn test_short_words_only_yields_empty() {
        assert!(KeywordAttribution.explain("ok go at 12 a").is_empty());
        assert!(KeywordAttribution.explain("").is_empty());
    }

    /// Probability of class 1 rises with every "panic" token
    struct PanicCounter;

    impl LogClassifier for PanicCounter {
        fn classify_batch(&self, texts: &[&str]) -> CoreResult<Vec<Vec<f64>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let hits = t.split_whitespace().filter(|w| w.contains("panic")).count();
                    let p = (0.2 * hits as f64).min(1.0);
                    vec![1.0 - p, p]
                })
                .collect())
        }
    }

    struct Broken;

    impl LogClassifier for Broken {
        fn classify_batch(&self, _texts: &[&str]) -> CoreResult<Vec<Vec<f64>>> {
            Err(CoreError::Inference("boom".to_string()))
        }
    }

    #[test]
    fn test_occlusion_ranks_influential_tokens() {
        let text = "cpu0 saw kernel panic then panic: halt";
        let prediction = PanicCounter.classify(text).unwrap();

        let indicators = OcclusionAttribution
            .explain(text, &PanicCounter, &prediction)
            .unwrap();

        assert_eq!(indicators.len(), 3);
        assert_eq!(indicators[0], "panic");
        assert_eq!(indicators[1], "panic:");
        // Remaining tokens tie at zero; earliest wins
        assert_eq!(indicators[2], "cpu0");
    }

    #[test]
    fn test_occlusion_short_line_returns_all_tokens() {
        let indicators = OcclusionAttribution
            .explain("Kernel Panic", &PanicCounter, &[0.6, 0.4])
            .unwrap();
        assert_eq!(indicators, vec!["Kernel", "Panic"]);

        let indicators = OcclusionAttribution.explain("   ", &PanicCounter, &[1.0, 0.0]).unwrap();
        assert!(indicators.is_empty());
    }

    #[test]
    fn test_native_failure_falls_back_to_keywords() {
        let provider = AttributionProvider::select(true);
        assert_eq!(provider.mode(), AttributionMode::Occlusion);

        let text = "disk controller reported fatal error on sda";
        let indicators = provider.key_indicators(text, &Broken, &[1.0, 0.0]);
        assert_eq!(indicators, KeywordAttribution.explain(text));
    }

    #[test]
    fn test_mismatched_distribution_is_an_error() {
        let tokens = ["a", "b", "c", "d"];
        let result = OcclusionAttribution.contributions(&tokens, &PanicCounter, &[1.0, 0.0, 0.0]);
        assert!(result.is_err());
    }

    /// Records (rows, bytes) of every batch; class 1 tracks "panic"
    #[derive(Default)]
    struct Counting {
        calls: parking_lot::Mutex<Vec<(usize, usize)>>,
    }

    impl LogClassifier for Counting {
        fn classify_batch(&self, texts: &[&str]) -> CoreResult<Vec<Vec<f64>>> {
            let bytes = texts.iter().map(|t| t.len()).sum();
            self.calls.lock().push((texts.len(), bytes));
            Ok(texts
                .iter()
                .map(|t| if t.contains("panic") { vec![0.2, 0.8] } else { vec![0.9, 0.1] })
                .collect())
        }
    }

    #[test]
    fn test_occlusion_cost_is_bounded_on_long_lines() {
        let line = (0..10_000)
            .map(|i| if i == 5 { "panic".to_string() } else { format!("w{}", i) })
            .collect::<Vec<_>>()
            .join(" ");
        let counting = Counting::default();
        let prediction = counting.classify(&line).unwrap();
        counting.calls.lock().clear();

        let indicators = AttributionProvider::select(true).key_indicators(&line, &counting, &prediction);
        assert_eq!(indicators[0], "panic");
        assert_eq!(indicators.len(), 3);

        let calls = counting.calls.lock();
        let total_rows: usize = calls.iter().map(|(rows, _)| rows).sum();
        let total_bytes: usize = calls.iter().map(|(_, bytes)| bytes).sum();

        assert!(calls.iter().all(|(rows, _)| *rows <= OCCLUSION_CHUNK_ROWS));
        // Window baseline plus one row per occluded token
        assert_eq!(total_rows, MAX_OCCLUSION_TOKENS + 1);
        assert!(total_bytes <= (MAX_OCCLUSION_TOKENS + 1) * MAX_OCCLUSION_BYTES);
        assert!(total_bytes < line.len() * 2);
    }

    #[test]
    fn test_oversized_window_falls_back_to_keywords() {
        let long = "x".repeat(4_000);
        let line = format!("{} {} disk {} {} timeout", long, long, long, long);
        let counting = Counting::default();

        let result = OcclusionAttribution.contributions(
            &line.split_whitespace().collect::<Vec<_>>(),
            &counting,
            &[0.9, 0.1],
        );
        assert!(matches!(result, Err(CoreError::Inference(_))));

        let indicators = AttributionProvider::select(true).key_indicators(&line, &counting, &[0.9, 0.1]);
        assert_eq!(indicators, vec!["disk", "timeout"]);
        assert!(counting.calls.lock().is_empty());
    }

    #[test]
    fn test_short_line_uses_one_chunk_without_rebasing() {
        let counting = Counting::default();
        let text = "cpu0 saw kernel panic then halt";
        let prediction = counting.classify(text).unwrap();
        counting.calls.lock().clear();

        let contributions = OcclusionAttribution
            .contributions(&text.split_whitespace().collect::<Vec<_>>(), &counting, &prediction)
            .unwrap();
        assert_eq!(contributions.len(), 6);
        // One batch of six variants, each the line minus one token and a space
        assert_eq!(*counting.calls.lock(), vec![(6, 154)]);
    }

    #[test]
    fn test_fallback_selection() {
        let provider = AttributionProvider::select(false);
        assert_eq!(provider.mode(), AttributionMode::Keyword);
        let indicators = provider.key_indicators("network timeout", &Broken, &[]);
        assert_eq!(indicators, vec!["network", "timeout"]);
    }
}
