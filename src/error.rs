use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read keyword resource {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Invalid page range: start page must be at least 1 (got {start}..{end})")]
    InvalidPageRange { start: usize, end: usize },

    #[error("Unsupported document type: {}", .0.display())]
    UnsupportedDocument(PathBuf),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
