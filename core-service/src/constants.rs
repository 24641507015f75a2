//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "LogLite";

/// Preferred model location, relative to the working directory
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Parent-level model location used when the app-local one is missing
pub const DEFAULT_FALLBACK_MODEL_DIR: &str = "../log_anomaly_model";

/// Exported classifier graph inside a model directory
pub const MODEL_FILE_NAME: &str = "model.onnx";

/// WordPiece vocabulary inside a model directory
pub const VOCAB_FILE_NAME: &str = "vocab.txt";

/// Longest token sequence fed to the classifier, `[CLS]` and `[SEP]` included
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 512;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the app-local model directory from environment or use default
pub fn get_model_dir() -> String {
    std::env::var("MODEL_DIR").unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string())
}

/// Get the parent-level model directory from environment or use default
pub fn get_fallback_model_dir() -> String {
    std::env::var("FALLBACK_MODEL_DIR")
        .unwrap_or_else(|_| DEFAULT_FALLBACK_MODEL_DIR.to_string())
}

/// Get the maximum sequence length from environment or use default
pub fn get_max_sequence_length() -> usize {
    std::env::var("MAX_SEQUENCE_LENGTH")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n >= 2)
        .unwrap_or(DEFAULT_MAX_SEQUENCE_LENGTH)
}

/// Check if model-based (occlusion) attribution is enabled
pub fn is_native_attribution_enabled() -> bool {
    std::env::var("NATIVE_ATTRIBUTION")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
