// file: src/extract/mod.rs
// description: text extraction dispatch over document kinds
// reference: internal module structure

pub mod image;
pub mod pdf;

pub use image::OcrEngine;

use crate::config::OcrConfig;
use crate::error::Result;
use crate::models::{Document, DocumentKind};

/// Text recovered from a document: the concatenated string and the page
/// count it came from (always 1 for images). The text may be empty when the
/// document contains nothing recognizable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
}

impl ExtractedText {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// One-shot dispatch on the validated document kind. No fallback between
/// paths and no content sniffing.
pub struct TextExtractor {
    ocr: OcrEngine,
}

impl TextExtractor {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            ocr: OcrEngine::new(config),
        }
    }

    pub fn extract(&self, document: &Document) -> Result<ExtractedText> {
        match document.kind {
            DocumentKind::Pdf => pdf::extract_text(&document.content),
            DocumentKind::Image => self.ocr.extract_text(&document.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ScanError;
    use crate::models::Document;

    #[test]
    fn test_dispatch_rejects_malformed_pdf() {
        let config = Config::default_config();
        let extractor = TextExtractor::new(&config.ocr);

        let document = Document::new(
            "broken.pdf".to_string(),
            "application/pdf".to_string(),
            b"not a pdf at all".to_vec(),
        )
        .unwrap();

        match extractor.extract(&document) {
            Err(ScanError::Extraction(_)) => {}
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_rejects_malformed_image() {
        let config = Config::default_config();
        let extractor = TextExtractor::new(&config.ocr);

        let document = Document::new(
            "broken.png".to_string(),
            "image/png".to_string(),
            b"not an image either".to_vec(),
        )
        .unwrap();

        match extractor.extract(&document) {
            Err(ScanError::ImageDecode(_)) => {}
            other => panic!("expected image decode error, got {:?}", other),
        }
    }
}
