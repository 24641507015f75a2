//! Inference Engine - ONNX Runtime Integration
//!
//! Wraps the exported sequence classifier behind `LogClassifier`, so the
//! hybrid engine only ever sees a probability distribution per text.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use super::artifacts::{self, ArtifactSource, ModelArtifacts};
use super::tokenizer::WordPieceTokenizer;
use crate::error::{CoreError, CoreResult};

/// Probe line used to validate a freshly loaded model
const WARMUP_TEXT: &str = "kernel: boot completed";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata, fixed at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub vocab_path: String,
    pub source: ArtifactSource,
    /// SHA-256 of the model file
    pub checksum: String,
    pub num_labels: usize,
    pub max_sequence_length: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Statistical text classifier: text in, distribution over labels out.
///
/// Implementations are loaded once and shared read-only across requests.
pub trait LogClassifier: Send + Sync {
    /// One distribution per input text, in input order. Each sums to 1.
    fn classify_batch(&self, texts: &[&str]) -> CoreResult<Vec<Vec<f64>>>;

    fn classify(&self, text: &str) -> CoreResult<Vec<f64>> {
        self.classify_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Inference("classifier returned no output".to_string()))
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    /// `Session::run` needs `&mut self`
    session: Mutex<Session>,
    tokenizer: WordPieceTokenizer,
    output_name: String,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Load the ONNX graph and vocabulary, then validate with one probe inference
    pub fn load(
        artifacts: &ModelArtifacts,
        max_sequence_length: usize,
        num_labels: usize,
    ) -> CoreResult<Self> {
        log::info!("Loading ONNX model from: {}", artifacts.model_path.display());

        let session = Session::builder()
            .map_err(|e| CoreError::Inference(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| CoreError::Inference(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(&artifacts.model_path)
            .map_err(|e| CoreError::Inference(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| CoreError::Inference("No output defined".to_string()))?;

        let tokenizer = WordPieceTokenizer::from_file(&artifacts.vocab_path, max_sequence_length)?;

        let metadata = ModelMetadata {
            model_path: artifacts.model_path.display().to_string(),
            vocab_path: artifacts.vocab_path.display().to_string(),
            source: artifacts.source,
            checksum: artifacts::checksum(&artifacts.model_path)?,
            num_labels,
            max_sequence_length,
            loaded_at: chrono::Utc::now(),
        };

        let classifier = Self {
            session: Mutex::new(session),
            tokenizer,
            output_name,
            metadata,
        };

        classifier.classify(WARMUP_TEXT)?;
        log::info!(
            "ONNX model loaded successfully ({} labels, vocab {}, sha256 {})",
            num_labels,
            classifier.tokenizer.vocab_size(),
            &classifier.metadata.checksum[..12.min(classifier.metadata.checksum.len())]
        );

        Ok(classifier)
    }

    /// Raw logits, row-major `[batch, num_labels]`
    fn run_logits(&self, texts: &[&str]) -> CoreResult<Vec<f32>> {
        let (input_ids, attention_mask) = self.tokenizer.encode_batch(texts)?;

        let ids_tensor = Value::from_array(input_ids)
            .map_err(|e| CoreError::Inference(format!("Tensor error: {}", e)))?;
        let mask_tensor = Value::from_array(attention_mask)
            .map_err(|e| CoreError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
            .map_err(|e| CoreError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.output_name.as_str())
            .ok_or_else(|| CoreError::Inference("No output".to_string()))?;

        let (_, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| CoreError::Inference(format!("Extract error: {}", e)))?;

        Ok(data.to_vec())
    }
}

impl LogClassifier for OnnxClassifier {
    fn classify_batch(&self, texts: &[&str]) -> CoreResult<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let logits = self.run_logits(texts)?;
        let width = self.metadata.num_labels;
        if width == 0 || logits.len() != texts.len() * width {
            return Err(CoreError::Inference(format!(
                "expected {} logits ({} texts x {} labels), got {}",
                texts.len() * width,
                texts.len(),
                width,
                logits.len()
            )));
        }

        Ok(logits.chunks(width).map(softmax).collect())
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Numerically stable softmax over one logits row
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = logits
        .iter()
        .map(|&l| f64::from(l - max).exp())
        .collect();
    let sum: f64 = exps.iter().sum();

    if sum > 0.0 && sum.is_finite() {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        vec![1.0 / logits.len().max(1) as f64; logits.len()]
    }
}

/// Index of the first maximum, the same pick as an argmax over the model output
pub fn argmax(distribution: &[f64]) -> Option<usize> {
    distribution
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[2.0, 1.0, 0.1, -3.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-9);
        assert!((probs[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), Some(1));
        assert_eq!(argmax(&[0.9]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    struct Uniform;

    impl LogClassifier for Uniform {
        fn classify_batch(&self, texts: &[&str]) -> CoreResult<Vec<Vec<f64>>> {
            Ok(texts.iter().map(|_| vec![0.5, 0.5]).collect())
        }
    }

    #[test]
    fn test_single_classify_uses_batch() {
        let dist = Uniform.classify("anything").unwrap();
        assert_eq!(dist, vec![0.5, 0.5]);
        assert!(Uniform.metadata().is_none());
    }
}
