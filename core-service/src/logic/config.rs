use std::path::PathBuf;

use crate::constants;

/// Analyzer configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Preferred (app-local) model directory
    pub model_dir: PathBuf,

    /// Parent-level model directory, searched second
    pub fallback_model_dir: PathBuf,

    /// Token budget per classifier input
    pub max_sequence_length: usize,

    /// Use occlusion attribution instead of the keyword fallback
    pub native_attribution: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(constants::DEFAULT_MODEL_DIR),
            fallback_model_dir: PathBuf::from(constants::DEFAULT_FALLBACK_MODEL_DIR),
            max_sequence_length: constants::DEFAULT_MAX_SEQUENCE_LENGTH,
            native_attribution: true,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_dir: PathBuf::from(constants::get_model_dir()),
            fallback_model_dir: PathBuf::from(constants::get_fallback_model_dir()),
            max_sequence_length: constants::get_max_sequence_length(),
            native_attribution: constants::is_native_attribution_enabled(),
        }
    }

    /// Directories searched for model artifacts, in priority order
    pub fn search_dirs(&self) -> [&std::path::Path; 2] {
        [self.model_dir.as_path(), self.fallback_model_dir.as_path()]
    }
}
