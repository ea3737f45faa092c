// file: src/ner/decode.rs
// description: token prediction decoding and BIO span aggregation with safe UTF-8 slicing
// reference: conll-2003 shared task tagging scheme

use crate::models::{Entity, EntityLabel};
use crate::ner::labels::LabelKind;

/// One token's classification: the decoded label kind, the softmax score of
/// the winning label, and the token's byte offsets into the source text.
#[derive(Debug, Clone)]
pub struct TokenPrediction {
    pub kind: LabelKind,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

/// A contiguous run of tokens sharing one base label, before category
/// filtering. Confidence is the mean winning-label score over the run.
#[derive(Debug, Clone)]
pub struct RawSpan {
    pub base: String,
    pub start: usize,
    pub end: usize,
    score_sum: f32,
    tokens: usize,
}

impl RawSpan {
    fn open(base: String, prediction: &TokenPrediction) -> Self {
        Self {
            base,
            start: prediction.start,
            end: prediction.end,
            score_sum: prediction.score,
            tokens: 1,
        }
    }

    fn extend(&mut self, prediction: &TokenPrediction) {
        self.end = prediction.end;
        self.score_sum += prediction.score;
        self.tokens += 1;
    }

    pub fn confidence(&self) -> f32 {
        self.score_sum / self.tokens as f32
    }
}

/// Numerically stable softmax over one token's logits.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Merge BIO-tagged token predictions into spans. B- opens a new span, I-
/// extends an open span with the same base label (or opens one when nothing
/// is open), O closes. Zero-width tokens (special tokens) are skipped
/// without closing the open span.
pub fn aggregate_spans(predictions: &[TokenPrediction]) -> Vec<RawSpan> {
    let mut spans = Vec::new();
    let mut open: Option<RawSpan> = None;

    for prediction in predictions {
        if prediction.start == prediction.end {
            continue;
        }

        match &prediction.kind {
            LabelKind::Outside => {
                if let Some(span) = open.take() {
                    spans.push(span);
                }
            }
            LabelKind::Begin(base) => {
                if let Some(span) = open.take() {
                    spans.push(span);
                }
                open = Some(RawSpan::open(base.clone(), prediction));
            }
            LabelKind::Inside(base) => match open.as_mut() {
                Some(span) if span.base == *base => span.extend(prediction),
                _ => {
                    if let Some(span) = open.take() {
                        spans.push(span);
                    }
                    open = Some(RawSpan::open(base.clone(), prediction));
                }
            },
        }
    }

    if let Some(span) = open.take() {
        spans.push(span);
    }

    spans
}

/// Turn raw spans into entities, keeping only person/organization base
/// labels and slicing the source text at character-boundary-safe offsets.
pub fn entities_from_spans(text: &str, spans: &[RawSpan]) -> Vec<Entity> {
    spans
        .iter()
        .filter_map(|span| {
            let label = EntityLabel::from_model_label(&span.base)?;
            let start = find_char_boundary_before(text, span.start);
            let end = find_char_boundary_after(text, span.end);
            if start >= end {
                return None;
            }
            Some(Entity::new(
                text[start..end].to_string(),
                label,
                start,
                end,
                span.confidence(),
            ))
        })
        .collect()
}

fn find_char_boundary_before(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn find_char_boundary_after(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
