// file: src/pipeline/processor.rs
// description: runs extraction, tagging, and reporting for one document
// reference: single-pass synchronous scan flow

use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::extract::{ExtractedText, TextExtractor};
use crate::models::{Document, DocumentKind, EntityReport};
use crate::ner::EntityTagger;
use crate::pipeline::progress::{ScanProgress, ScanStats};
use crate::report::{self, Notice};
use std::time::Instant;
use tracing::{debug, info};

pub struct ScanOutcome {
    pub text: ExtractedText,
    pub report: EntityReport,
    pub notices: Vec<Notice>,
    pub stats: ScanStats,
}

/// Owns the extractor and the injected tagger and runs the three scan
/// phases for one document. No retries, no partial results: the first
/// failing phase aborts the scan.
pub struct DocumentProcessor {
    config: Config,
    extractor: TextExtractor,
    tagger: Box<dyn EntityTagger>,
}

impl DocumentProcessor {
    pub fn new(config: Config, tagger: Box<dyn EntityTagger>) -> Self {
        let extractor = TextExtractor::new(&config.ocr);
        Self {
            config,
            extractor,
            tagger,
        }
    }

    pub fn process(&mut self, document: &Document, progress: &ScanProgress) -> Result<ScanOutcome> {
        info!(
            "Scanning {} ({}) with {}",
            document.file_name,
            document.media_type,
            self.tagger.name()
        );
        debug!("Content hash: {}", document.content_hash);

        let max_bytes = (self.config.limits.max_document_size_mb as u64) * 1_048_576;
        if max_bytes > 0 && document.size_bytes() > max_bytes {
            return Err(ScanError::Validation(format!(
                "Document too large ({} bytes, limit {} MB): {}",
                document.size_bytes(),
                self.config.limits.max_document_size_mb,
                document.file_name
            )));
        }

        progress.start_phase(match document.kind {
            DocumentKind::Pdf => "Extracting text from PDF...",
            DocumentKind::Image => "Extracting text from image...",
        });
        let started = Instant::now();
        let text = self.extractor.extract(document)?;
        let extract_ms = started.elapsed().as_millis() as u64;
        debug!(
            "Extracted {} characters from {} page(s)",
            text.char_count(),
            text.pages
        );

        progress.start_phase("Analyzing text for names and companies...");
        let started = Instant::now();
        let entities = self.tagger.tag(&text.text)?;
        let tag_ms = started.elapsed().as_millis() as u64;
        progress.finish();

        let report = EntityReport::from_entities(&entities);
        let notices = report::render(&report);

        let stats = ScanStats {
            pages: text.pages,
            characters: text.char_count(),
            entities_tagged: entities.len(),
            unique_names: report.names.len(),
            unique_companies: report.companies.len(),
            extract_ms,
            tag_ms,
        };

        Ok(ScanOutcome {
            text,
            report,
            notices,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::pdf::testing::build_pdf;
    use crate::models::{Entity, EntityLabel};
    use crate::report::Severity;

    /// Deterministic tagger for pipeline tests: tags every occurrence of a
    /// fixed set of known strings.
    struct StubTagger;

    impl EntityTagger for StubTagger {
        fn tag(&mut self, text: &str) -> Result<Vec<Entity>> {
            let known = [
                ("John Smith", EntityLabel::Person),
                ("Acme Corp", EntityLabel::Organization),
            ];

            let mut entities = Vec::new();
            for (needle, label) in known {
                let mut from = 0;
                while let Some(at) = text[from..].find(needle) {
                    let start = from + at;
                    let end = start + needle.len();
                    entities.push(Entity::new(needle.to_string(), label, start, end, 1.0));
                    from = end;
                }
            }
            Ok(entities)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn pdf_document(page_texts: &[&str]) -> Document {
        Document::new(
            "scan.pdf".to_string(),
            "application/pdf".to_string(),
            build_pdf(page_texts),
        )
        .unwrap()
    }

    #[test]
    fn test_scan_tags_and_partitions() {
        let mut processor =
            DocumentProcessor::new(Config::default_config(), Box::new(StubTagger));
        let document = pdf_document(&["John Smith works at Acme Corp."]);

        let outcome = processor
            .process(&document, &ScanProgress::disabled())
            .unwrap();

        assert!(outcome.report.names.contains("John Smith"));
        assert!(outcome.report.companies.contains("Acme Corp"));
        assert_eq!(outcome.stats.pages, 1);
        assert!(outcome.stats.characters > 0);
        assert_eq!(outcome.notices.len(), 2);
        assert_eq!(outcome.notices[0].severity, Severity::Warning);
        assert_eq!(outcome.notices[1].severity, Severity::Warning);
    }

    #[test]
    fn test_scan_without_entities_reports_none() {
        let mut processor =
            DocumentProcessor::new(Config::default_config(), Box::new(StubTagger));
        let document = pdf_document(&["nothing of interest on this page"]);

        let outcome = processor
            .process(&document, &ScanProgress::disabled())
            .unwrap();

        assert!(outcome.report.is_empty());
        assert_eq!(outcome.notices[0].severity, Severity::Success);
        assert_eq!(outcome.notices[1].severity, Severity::Success);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let mut processor =
            DocumentProcessor::new(Config::default_config(), Box::new(StubTagger));
        let document = pdf_document(&["John Smith met John Smith at Acme Corp."]);

        let first = processor
            .process(&document, &ScanProgress::disabled())
            .unwrap();
        let second = processor
            .process(&document, &ScanProgress::disabled())
            .unwrap();

        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_oversized_document_rejected() {
        let mut config = Config::default_config();
        config.limits.max_document_size_mb = 1;
        let mut processor = DocumentProcessor::new(config, Box::new(StubTagger));

        let content = vec![b'%'; 2 * 1_048_576];
        let document = Document::new(
            "huge.pdf".to_string(),
            "application/pdf".to_string(),
            content,
        )
        .unwrap();

        let result = processor.process(&document, &ScanProgress::disabled());
        assert!(matches!(result, Err(ScanError::Validation(_))));
    }
}
