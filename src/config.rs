// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ScanError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub model: ModelConfig,
    pub ocr: OcrConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub dir: PathBuf,
    pub max_sequence_length: usize,
    pub intra_threads: usize,
}

impl ModelConfig {
    pub fn weights_path(&self) -> PathBuf {
        self.dir.join("model.onnx")
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.dir.join("tokenizer.json")
    }

    pub fn labels_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    pub binary: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    pub max_document_size_mb: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DOC_ENTITIES")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            model: ModelConfig {
                dir: PathBuf::from("models/ner"),
                max_sequence_length: 512,
                intra_threads: 4,
            },
            ocr: OcrConfig {
                binary: PathBuf::from("tesseract"),
            },
            limits: LimitsConfig {
                max_document_size_mb: 32,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.model.max_sequence_length == 0 {
            return Err(ScanError::Config(
                "max_sequence_length must be greater than 0".to_string(),
            ));
        }

        if self.model.intra_threads == 0 {
            return Err(ScanError::Config(
                "intra_threads must be greater than 0".to_string(),
            ));
        }

        if self.limits.max_document_size_mb == 0 {
            return Err(ScanError::Config(
                "max_document_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.ocr.binary.as_os_str().is_empty() {
            return Err(ScanError::Config(
                "ocr binary path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
