// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported media type: {media_type}")]
    UnsupportedType { media_type: String },

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("Text extraction failed on page {page}: {source}")]
    PageExtraction { page: u32, source: lopdf::Error },

    #[error("Image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("OCR engine failure: {0}")]
    Ocr(String),

    #[error("NER model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("Input of {tokens} tokens exceeds the model maximum of {max}")]
    InputLength { tokens: usize, max: usize },

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("ONNX runtime error: {0}")]
    Ort(#[from] ort::Error),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
