// file: src/models/document.rs
// description: uploaded document model with media type validation and hashing
// reference: iana media type registry

use crate::error::{Result, ScanError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

lazy_static! {
    static ref MEDIA_TYPE: Regex =
        Regex::new(r"^[a-z]+/[a-z0-9][a-z0-9!#$&^_.+-]*$").expect("MEDIA_TYPE regex is valid");
}

/// Extraction path for a document, validated from its declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    /// Map a declared media type onto an extraction path. Anything that is
    /// neither `application/pdf` nor `image/*` is rejected; non-PDF uploads
    /// are never assumed to be images.
    pub fn from_media_type(media_type: &str) -> Result<Self> {
        if !MEDIA_TYPE.is_match(media_type) {
            return Err(ScanError::UnsupportedType {
                media_type: media_type.to_string(),
            });
        }

        if media_type == "application/pdf" {
            Ok(DocumentKind::Pdf)
        } else if media_type.starts_with("image/") {
            Ok(DocumentKind::Image)
        } else {
            Err(ScanError::UnsupportedType {
                media_type: media_type.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Image => "image",
        }
    }
}

/// Declared media type for a file extension. The accepted set mirrors the
/// upload restriction: PDF plus common raster image formats.
pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "tif" | "tiff" => Some("image/tiff"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub file_name: String,
    pub media_type: String,
    pub kind: DocumentKind,
    pub content: Vec<u8>,
    pub content_hash: String,
    pub loaded_at: u64,
}

impl Document {
    pub fn new(file_name: String, media_type: String, content: Vec<u8>) -> Result<Self> {
        if content.is_empty() {
            return Err(ScanError::Validation(format!(
                "Document is empty: {}",
                file_name
            )));
        }

        let kind = DocumentKind::from_media_type(&media_type)?;
        let content_hash = Self::compute_hash(&content);
        let loaded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Ok(Self {
            file_name,
            media_type,
            kind,
            content,
            content_hash,
            loaded_at,
        })
    }

    /// Load a document from disk. The media type is declared by the caller
    /// or derived from the file extension, never sniffed from content.
    pub fn from_path(path: &Path, declared_media_type: Option<&str>) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let media_type = match declared_media_type {
            Some(media_type) => media_type.to_string(),
            None => {
                let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                media_type_for_extension(extension)
                    .ok_or_else(|| ScanError::UnsupportedType {
                        media_type: if extension.is_empty() {
                            "(no extension)".to_string()
                        } else {
                            format!(".{}", extension)
                        },
                    })?
                    .to_string()
            }
        };

        let content = fs::read(path)?;
        Self::new(file_name, media_type, content)
    }

    fn compute_hash(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        format!("{:x}", hasher.finalize())
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}
