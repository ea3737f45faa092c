// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod ner;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::{Config, LimitsConfig, ModelConfig, OcrConfig};
pub use error::{Result, ScanError};
pub use extract::{ExtractedText, OcrEngine, TextExtractor};
pub use models::{Document, DocumentKind, Entity, EntityLabel, EntityReport};
pub use ner::{EntityTagger, LabelKind, LabelMap, OnnxNerTagger};
pub use pipeline::{DocumentProcessor, ScanOutcome, ScanProgress, ScanStats};
pub use report::{Notice, Severity, render};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _report = EntityReport::new();
    }
}
