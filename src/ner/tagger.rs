// file: src/ner/tagger.rs
// description: entity tagger service trait and the ONNX runtime implementation
// reference: https://docs.rs/ort

use crate::config::ModelConfig;
use crate::error::{Result, ScanError};
use crate::models::Entity;
use crate::ner::decode::{TokenPrediction, aggregate_spans, entities_from_spans, softmax};
use crate::ner::labels::LabelMap;
use ndarray::ArrayView2;
use ort::{inputs, session::Session, session::builder::GraphOptimizationLevel, value::Value};
use std::path::Path;
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// Injected tagging service. The pipeline owns one instance for its whole
/// lifetime; the production implementation is `OnnxNerTagger`.
pub trait EntityTagger {
    /// Tag the full text, keeping only person/organization spans. Inputs
    /// longer than the model's maximum are an error, never truncated.
    fn tag(&mut self, text: &str) -> Result<Vec<Entity>>;

    fn name(&self) -> &str;
}

/// Pretrained token-classification model executed through ONNX Runtime.
/// Construction fails fast when any artifact is missing; there is no
/// runtime download step.
#[derive(Debug)]
pub struct OnnxNerTagger {
    session: Session,
    tokenizer: Tokenizer,
    labels: LabelMap,
    max_length: usize,
    describe: String,
}

impl OnnxNerTagger {
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let weights = config.weights_path();
        if !weights.exists() {
            return Err(ScanError::ModelUnavailable {
                path: weights,
                reason: "model.onnx not found; run `doc_entities check` for setup status"
                    .to_string(),
            });
        }

        let tokenizer_path = config.tokenizer_path();
        if !tokenizer_path.exists() {
            return Err(ScanError::ModelUnavailable {
                path: tokenizer_path,
                reason: "tokenizer.json not found next to the model weights".to_string(),
            });
        }

        let _ = ort::init();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .commit_from_file(&weights)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ScanError::Tokenizer(e.to_string()))?;

        let labels_path = config.labels_path();
        let labels = if labels_path.exists() {
            LabelMap::from_config_file(&labels_path)?
        } else {
            info!(
                "No config.json in {}, using the CoNLL-2003 label order",
                config.dir.display()
            );
            LabelMap::conll2003()
        };

        info!(
            "Loaded NER model from {} ({} labels, max {} tokens)",
            config.dir.display(),
            labels.len(),
            config.max_sequence_length
        );

        Ok(Self {
            session,
            tokenizer,
            labels,
            max_length: config.max_sequence_length,
            describe: describe_model(&config.dir),
        })
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl EntityTagger for OnnxNerTagger {
    fn tag(&mut self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ScanError::Tokenizer(e.to_string()))?;

        let token_count = encoding.get_ids().len();
        if token_count > self.max_length {
            return Err(ScanError::InputLength {
                tokens: token_count,
                max: self.max_length,
            });
        }
        debug!("Tagging {} tokens", token_count);

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();

        let input_ids = Value::from_array(([1_usize, token_count], ids.into_boxed_slice()))?;
        let attention_mask = Value::from_array(([1_usize, token_count], mask.into_boxed_slice()))?;
        let outputs = self.session.run(inputs![input_ids, attention_mask])?;

        let (shape, data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        if dims.len() != 3 || dims[0] != 1 || dims[1] != token_count {
            return Err(ScanError::Inference(format!(
                "Unexpected logits shape {:?} for {} tokens",
                dims, token_count
            )));
        }

        let logits = ArrayView2::from_shape((dims[1], dims[2]), data)
            .map_err(|e| ScanError::Inference(e.to_string()))?;

        let offsets = encoding.get_offsets();
        let special = encoding.get_special_tokens_mask();

        let mut predictions = Vec::with_capacity(token_count);
        for index in 0..token_count {
            if special.get(index).copied().unwrap_or(0) == 1 {
                continue;
            }

            let row: Vec<f32> = logits.row(index).iter().copied().collect();
            let probabilities = softmax(&row);
            let (best, score) = probabilities
                .iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |acc, (i, &p)| {
                    if p > acc.1 { (i, p) } else { acc }
                });

            let (start, end) = offsets[index];
            predictions.push(TokenPrediction {
                kind: self.labels.kind_of(best),
                score,
                start,
                end,
            });
        }

        let spans = aggregate_spans(&predictions);
        let entities = entities_from_spans(text, &spans);
        debug!(
            "Kept {} person/organization entities from {} spans",
            entities.len(),
            spans.len()
        );

        Ok(entities)
    }

    fn name(&self) -> &str {
        &self.describe
    }
}

fn describe_model(dir: &Path) -> String {
    format!("onnx-ner ({})", dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn model_config(dir: PathBuf) -> ModelConfig {
        ModelConfig {
            dir,
            max_sequence_length: 512,
            intra_threads: 1,
        }
    }

    #[test]
    fn test_load_fails_fast_without_weights() {
        let dir = TempDir::new().unwrap();
        let result = OnnxNerTagger::load(&model_config(dir.path().to_path_buf()));

        match result {
            Err(ScanError::ModelUnavailable { path, .. }) => {
                assert!(path.ends_with("model.onnx"));
            }
            other => panic!("expected model unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fails_fast_without_tokenizer() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("model.onnx"), b"placeholder").unwrap();

        let result = OnnxNerTagger::load(&model_config(dir.path().to_path_buf()));
        match result {
            Err(ScanError::ModelUnavailable { path, .. }) => {
                assert!(path.ends_with("tokenizer.json"));
            }
            other => panic!("expected model unavailable, got {:?}", other),
        }
    }
}
