//! Error handling

use std::path::PathBuf;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup miss in the label registry. Never expected with the fixed table.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("cannot find {file} in any known location (searched: {searched:?})")]
    ModelNotFound { file: String, searched: Vec<PathBuf> },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference error: {0}")]
    Inference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
