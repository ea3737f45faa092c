// file: src/ner/labels.rs
// description: model label map with BIO prefix handling
// reference: conll-2003 shared task tagging scheme

use crate::error::{Result, ScanError};
use lazy_static::lazy_static;
use serde_json::Value;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref CONLL2003_LABELS: Vec<&'static str> = vec![
        "O", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
    ];
}

/// Position of a token label within a BIO-tagged span. The payload is the
/// base label with the prefix stripped (e.g. "PER" for "B-PER").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelKind {
    Begin(String),
    Inside(String),
    Outside,
}

/// Mapping from classifier output index to label string.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Default CoNLL-2003 label order, used when the model directory ships
    /// no id2label map.
    pub fn conll2003() -> Self {
        Self::from_labels(CONLL2003_LABELS.iter().map(|s| s.to_string()).collect())
    }

    /// Read the `id2label` table from a HuggingFace-style config.json.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| ScanError::Config(format!("Cannot parse {}: {}", path.display(), e)))?;

        let id2label = value
            .get("id2label")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ScanError::Config(format!("No id2label table in {}", path.display()))
            })?;

        let mut labels = vec![String::from("O"); id2label.len()];
        for (id, label) in id2label {
            let index: usize = id.parse().map_err(|_| {
                ScanError::Config(format!("Non-numeric label id {:?} in {}", id, path.display()))
            })?;
            let label = label.as_str().ok_or_else(|| {
                ScanError::Config(format!("Non-string label for id {} in {}", index, path.display()))
            })?;

            if index >= labels.len() {
                labels.resize(index + 1, String::from("O"));
            }
            labels[index] = label.to_string();
        }

        Ok(Self::from_labels(labels))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Classify an output index. Out-of-range ids and "O" are outside; bare
    /// labels without a BIO prefix (IO-scheme models) are treated as inside
    /// so adjacent runs of the same label merge into one span.
    pub fn kind_of(&self, id: usize) -> LabelKind {
        match self.labels.get(id) {
            None => LabelKind::Outside,
            Some(label) => parse_label(label),
        }
    }
}

fn parse_label(label: &str) -> LabelKind {
    if label == "O" || label.is_empty() {
        LabelKind::Outside
    } else if let Some(base) = label.strip_prefix("B-") {
        LabelKind::Begin(base.to_string())
    } else if let Some(base) = label.strip_prefix("I-") {
        LabelKind::Inside(base.to_string())
    } else {
        LabelKind::Inside(label.to_string())
    }
}
