use serde::{Deserialize, Serialize};

/// Which attribution variant produced the key indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMode {
    /// Model-driven occlusion over whitespace tokens
    Occlusion,
    /// Tier-scored keyword extraction
    Keyword,
}

impl AttributionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionMode::Occlusion => "occlusion",
            AttributionMode::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for AttributionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContribution {
    pub token: String,
    /// Position among the whitespace tokens of the line
    pub position: usize,
    /// Mean absolute change of the distribution when the token is removed
    pub importance: f64,
}
