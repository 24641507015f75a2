//! Hybrid Decision Engine
//!
//! One log line in, one `ClassificationResult` out. The statistical verdict
//! stands unless the keyword heuristic flags an anomaly the model either
//! missed or is unsure about.

use std::sync::Arc;

use super::types::{ClassificationResult, TopClassification};
use crate::constants;
use crate::error::{CoreError, CoreResult};
use crate::logic::components::ComponentTable;
use crate::logic::config::AnalyzerConfig;
use crate::logic::explain::{self, AttributionProvider};
use crate::logic::keywords::{KeywordRules, KeywordScore};
use crate::logic::labels::{
    LabelRegistry, CLASS_KERNDTLB, CLASS_KERNELRND, CLASS_KERNPANIC, CLASS_KERNSTOR, CLASS_NORMAL,
};
use crate::logic::model::{self, argmax, LogClassifier, OnnxClassifier};

/// Below this model confidence (percent) a keyword anomaly takes over
pub const OVERRIDE_CONFIDENCE_THRESHOLD: f64 = 70.0;

/// Blend weights for an overridden verdict
pub const MODEL_BLEND_WEIGHT: f64 = 0.2;
pub const KEYWORD_BLEND_WEIGHT: f64 = 0.8;

/// Classes reported per line
pub const TOP_CLASSIFICATIONS: usize = 3;

pub struct LogAnalyzer {
    classifier: Arc<dyn LogClassifier>,
    labels: LabelRegistry,
    keywords: KeywordRules,
    components: ComponentTable,
    attribution: AttributionProvider,
}

impl LogAnalyzer {
    /// Analyzer over the default kernel tables
    pub fn new(classifier: Arc<dyn LogClassifier>, attribution: AttributionProvider) -> Self {
        Self::with_tables(
            classifier,
            LabelRegistry::kernel(),
            KeywordRules::default(),
            ComponentTable::default(),
            attribution,
        )
    }

    pub fn with_tables(
        classifier: Arc<dyn LogClassifier>,
        labels: LabelRegistry,
        keywords: KeywordRules,
        components: ComponentTable,
        attribution: AttributionProvider,
    ) -> Self {
        Self {
            classifier,
            labels,
            keywords,
            components,
            attribution,
        }
    }

    /// Locate and load the ONNX model, then select the attribution variant.
    ///
    /// A missing model is fatal: there is no keyword-only mode.
    pub fn from_config(config: &AnalyzerConfig) -> CoreResult<Self> {
        log::info!("{} v{} loading classifier", constants::APP_NAME, constants::APP_VERSION);

        let labels = LabelRegistry::kernel();
        let [app_dir, fallback_dir] = config.search_dirs();
        let artifacts = model::artifacts::locate(app_dir, fallback_dir)?;
        let classifier = OnnxClassifier::load(&artifacts, config.max_sequence_length, labels.len())?;

        let attribution = AttributionProvider::select(config.native_attribution);
        log::info!("Attribution mode: {}", attribution.mode());

        Ok(Self::with_tables(
            Arc::new(classifier),
            labels,
            KeywordRules::default(),
            ComponentTable::default(),
            attribution,
        ))
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn attribution(&self) -> AttributionProvider {
        self.attribution
    }

    pub fn classifier(&self) -> &dyn LogClassifier {
        self.classifier.as_ref()
    }

    /// Classify and explain one log line
    pub fn analyze_line(&self, text: &str) -> CoreResult<ClassificationResult> {
        let prediction = self.classifier.classify(text)?;
        if prediction.len() != self.labels.len() {
            return Err(CoreError::Inference(format!(
                "classifier returned {} classes, label table has {}",
                prediction.len(),
                self.labels.len()
            )));
        }

        let model_class = argmax(&prediction)
            .ok_or_else(|| CoreError::Inference("empty distribution".to_string()))?;
        let model_confidence = prediction[model_class] * 100.0;

        let keyword = self.keywords.score(text);
        let (class_id, confidence, distribution) =
            match self.keyword_override(text, model_class, model_confidence, &keyword) {
                Some(class_id) => {
                    let confidence = model_confidence * MODEL_BLEND_WEIGHT
                        + keyword.confidence * KEYWORD_BLEND_WEIGHT;
                    log::debug!(
                        "Keyword override: model {} ({:.1}%) -> class {} ({:.1}%)",
                        model_class,
                        model_confidence,
                        class_id,
                        confidence
                    );
                    let rewritten = rewrite_distribution(&prediction, class_id, confidence)?;
                    (class_id, confidence, rewritten)
                }
                None => (model_class, model_confidence, prediction.clone()),
            };

        let predicted_class = self.labels.class_by_id(class_id)?.clone();
        let affected_components = self.components.identify(text);
        let key_indicators =
            self.attribution
                .key_indicators(text, self.classifier.as_ref(), &prediction);

        let root_cause = explain::root_cause(&predicted_class.name, &key_indicators);
        let recommendation = explain::recommendation(&predicted_class.name, &affected_components);
        let top_classifications = self.top_classifications(&distribution)?;

        Ok(ClassificationResult {
            log_text: text.to_string(),
            is_anomaly: !predicted_class.is_normal(),
            severity: predicted_class.severity,
            confidence: confidence.clamp(0.0, 100.0),
            predicted_class,
            affected_components,
            root_cause,
            recommendation,
            key_indicators,
            top_classifications,
        })
    }

    /// The class replacing the model's verdict, if the override applies
    fn keyword_override(
        &self,
        text: &str,
        model_class: usize,
        model_confidence: f64,
        keyword: &KeywordScore,
    ) -> Option<usize> {
        let applies = keyword.is_anomaly
            && (model_class == CLASS_NORMAL || model_confidence < OVERRIDE_CONFIDENCE_THRESHOLD);
        if !applies {
            return None;
        }

        // A suggested class of 0 counts as no suggestion
        keyword
            .suggested_class
            .filter(|class| *class != CLASS_NORMAL && *class < self.labels.len())
            .or_else(|| Some(content_tie_break(text)))
    }

    fn top_classifications(&self, distribution: &[f64]) -> CoreResult<Vec<TopClassification>> {
        let mut ranked: Vec<(usize, f64)> = distribution.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        ranked
            .into_iter()
            .take(TOP_CLASSIFICATIONS)
            .map(|(id, probability)| {
                Ok(TopClassification {
                    class_name: self.labels.class_by_id(id)?.name.clone(),
                    probability,
                })
            })
            .collect()
    }
}

/// Fixed text-content pick when the keyword tables name no class
fn content_tie_break(text: &str) -> usize {
    let lower = text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(*w));

    if mentions(&["memory", "cache", "tlb"]) {
        CLASS_KERNDTLB
    } else if mentions(&["disk", "storage", "read"]) {
        CLASS_KERNSTOR
    } else if mentions(&["fail", "error", "corrupt"]) {
        CLASS_KERNPANIC
    } else {
        CLASS_KERNELRND
    }
}

/// Copy of `prediction` with the override class and the normal class rewritten
fn rewrite_distribution(prediction: &[f64], class_id: usize, confidence: f64) -> CoreResult<Vec<f64>> {
    if class_id >= prediction.len() {
        return Err(CoreError::UnknownClass(format!("id {}", class_id)));
    }

    let share = confidence / 100.0;
    let mut distribution = prediction.to_vec();
    distribution[class_id] = share;
    distribution[CLASS_NORMAL] = 1.0 - share;
    Ok(distribution)
}
