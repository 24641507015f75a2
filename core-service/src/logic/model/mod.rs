//! Model Module - Statistical Classifier Adapter
//!
//! Inference is isolated behind `LogClassifier` so the ONNX model can be
//! swapped for any other distribution-producing backend.

pub mod artifacts;
pub mod inference;
pub mod tokenizer;

// Re-export common types
pub use artifacts::{ArtifactSource, ModelArtifacts};
pub use inference::{LogClassifier, ModelMetadata, OnnxClassifier, argmax, softmax};
pub use tokenizer::WordPieceTokenizer;
