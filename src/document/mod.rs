pub mod chunk;
pub mod pdf;
pub mod text;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Plain text of every page, index 0 holding page 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPages {
    pages: Vec<String>,
}

impl DocumentPages {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Text of a 1-indexed page; pages outside the document read as empty.
    pub fn page(&self, number: usize) -> &str {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }

    /// Pages `start..=end` (1-indexed, clamped to the document) joined by newlines.
    ///
    /// An inverted range gives an empty string.
    pub fn window(&self, start: usize, end: usize) -> String {
        let from = start.saturating_sub(1).min(self.pages.len());
        let to = end.min(self.pages.len());
        if from >= to {
            return String::new();
        }
        self.pages[from..to].join("\n")
    }

    pub fn joined(&self) -> String {
        self.pages.join("\n")
    }
}

/// Identity of a document: hex SHA-256 of its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    pub fn parse(id: &str) -> Result<Self> {
        if id.len() == 64 && id.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(id.to_ascii_lowercase()))
        } else {
            Err(Error::Session(format!("Not a document id: {}", id)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("pdf") | Some("txt"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Reads the file once, fingerprints it, and returns the id without extracting text.
pub fn identify(path: &Path) -> Result<(DocumentId, Vec<u8>)> {
    if !is_supported(path) {
        return Err(Error::UnsupportedDocument(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok((DocumentId::from_bytes(&bytes), bytes))
}

pub fn extract(path: &Path, bytes: &[u8]) -> Result<DocumentPages> {
    let pages = match extension(path).as_deref() {
        Some("pdf") => pdf::extract_pages(bytes)?,
        Some("txt") => text::extract_pages(bytes),
        _ => return Err(Error::UnsupportedDocument(path.to_path_buf())),
    };
    let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
    log::info!("Extracted {} pages from {} ({} without text)", pages.len(), path.display(), empty);
    Ok(DocumentPages::new(pages))
}
