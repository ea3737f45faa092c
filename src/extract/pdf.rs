// file: src/extract/pdf.rs
// description: paginated PDF text extraction in ascending page order
// reference: https://docs.rs/lopdf

use crate::error::{Result, ScanError};
use crate::extract::ExtractedText;
use lopdf::Document;
use tracing::debug;

/// Open the byte stream as a paginated PDF and concatenate each page's text
/// in page order, without added separators. An empty page contributes the
/// empty string; a page whose text cannot be recovered fails the scan with
/// the page number attached.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ScanError::Extraction(format!("Cannot open PDF: {}", e)))?;

    if doc.is_encrypted() {
        return Err(ScanError::Extraction("PDF is encrypted".to_string()));
    }

    let pages = doc.get_pages();
    debug!("Extracting text from {} PDF page(s)", pages.len());

    let mut text = String::new();
    for &number in pages.keys() {
        let page_text = doc
            .extract_text(&[number])
            .map_err(|source| ScanError::PageExtraction {
                page: number,
                source,
            })?;
        text.push_str(&page_text);
    }

    Ok(ExtractedText {
        text,
        pages: pages.len(),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::build_pdf;
    use super::*;

    #[test]
    fn test_single_page_text() {
        let bytes = build_pdf(&["John Smith works at Acme Corp."]);
        let extracted = extract_text(&bytes).unwrap();

        assert_eq!(extracted.pages, 1);
        assert!(extracted.text.contains("John Smith works at Acme Corp."));
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let bytes = build_pdf(&["first page text", "second page text"]);
        let extracted = extract_text(&bytes).unwrap();

        assert_eq!(extracted.pages, 2);
        let first = extracted.text.find("first page text").unwrap();
        let second = extracted.text.find("second page text").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_page_contributes_empty_string() {
        let bytes = build_pdf(&["before the gap", "", "after the gap"]);
        let extracted = extract_text(&bytes).unwrap();

        assert_eq!(extracted.pages, 3);
        assert!(extracted.text.contains("before the gap"));
        assert!(extracted.text.contains("after the gap"));
    }

    #[test]
    fn test_malformed_bytes_fail() {
        let result = extract_text(b"definitely not a pdf");
        match result {
            Err(ScanError::Extraction(message)) => {
                assert!(message.contains("Cannot open PDF"));
            }
            other => panic!("expected extraction error, got {:?}", other),
        }
    }
}
