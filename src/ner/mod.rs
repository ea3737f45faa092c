// file: src/ner/mod.rs
// description: named entity recognition module exports
// reference: internal module structure

pub mod decode;
pub mod labels;
pub mod tagger;

pub use decode::{TokenPrediction, aggregate_spans, entities_from_spans};
pub use labels::{LabelKind, LabelMap};
pub use tagger::{EntityTagger, OnnxNerTagger};
