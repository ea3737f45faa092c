// file: src/extract/image.rs
// description: raster image OCR through a local tesseract binary
// reference: https://github.com/tesseract-ocr/tesseract

use crate::config::OcrConfig;
use crate::error::{Result, ScanError};
use crate::extract::ExtractedText;
use image::ImageFormat;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

lazy_static! {
    static ref TESSERACT_VERSION: Regex =
        Regex::new(r"tesseract v?(\d+[\d.]*\d)").expect("TESSERACT_VERSION regex is valid");
}

/// OCR engine backed by the `tesseract` executable. The upload is decoded
/// first so undecodable bytes fail before the subprocess runs, then handed
/// over as a normalized temporary PNG.
pub struct OcrEngine {
    binary: PathBuf,
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
        }
    }

    pub fn extract_text(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let decoded = image::load_from_memory(bytes)?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Decoded raster image for OCR"
        );

        let input = tempfile::Builder::new()
            .prefix("doc_entities_ocr_")
            .suffix(".png")
            .tempfile()?;
        decoded.save_with_format(input.path(), ImageFormat::Png)?;

        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .output()
            .map_err(|e| {
                ScanError::Ocr(format!("Cannot run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("OCR produced {} bytes of text", text.len());

        Ok(ExtractedText { text, pages: 1 })
    }

    /// Probe the binary with `--version` and return the reported version.
    /// tesseract prints its version banner on stderr on some platforms, so
    /// both streams are searched.
    pub fn probe(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| {
                ScanError::Ocr(format!("Cannot run {}: {}", self.binary.display(), e))
            })?;

        let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
        banner.push_str(&String::from_utf8_lossy(&output.stderr));

        match TESSERACT_VERSION.captures(&banner) {
            Some(captures) => Ok(format!("tesseract {}", &captures[1])),
            None => Err(ScanError::Ocr(format!(
                "Unrecognized --version output from {}",
                self.binary.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_binary(binary: &str) -> OcrEngine {
        OcrEngine::new(&OcrConfig {
            binary: PathBuf::from(binary),
        })
    }

    #[test]
    fn test_undecodable_bytes_fail_before_subprocess() {
        // A missing binary would also fail, so a decode error here proves
        // the decode happens first.
        let engine = engine_with_binary("/nonexistent/tesseract");
        let result = engine.extract_text(b"not an image");

        match result {
            Err(ScanError::ImageDecode(_)) => {}
            other => panic!("expected image decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_probe_missing_binary() {
        let engine = engine_with_binary("/nonexistent/tesseract");
        match engine.probe() {
            Err(ScanError::Ocr(message)) => assert!(message.contains("Cannot run")),
            other => panic!("expected ocr error, got {:?}", other),
        }
    }

    #[test]
    fn test_version_pattern() {
        assert_eq!(
            &TESSERACT_VERSION.captures("tesseract 5.3.4").unwrap()[1],
            "5.3.4"
        );
        assert_eq!(
            &TESSERACT_VERSION.captures("tesseract v4.1.1\n leptonica-1.82").unwrap()[1],
            "4.1.1"
        );
        assert!(TESSERACT_VERSION.captures("command not found").is_none());
    }
}
