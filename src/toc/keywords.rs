use std::fs;
use std::path::Path;

use crate::document::text::decode_ignoring_errors;
use crate::error::{Error, Result};

/// Reference section-title fragments used to recognise table-of-contents lines.
///
/// Entries are lowercased and trimmed but keep their punctuation; matching is
/// by substring against normalized text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords {
    entries: Vec<String>,
}

impl Keywords {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        let keywords = Self::from_lines(&decode_ignoring_errors(&bytes));
        log::info!("Loaded {} gold keywords from {}", keywords.len(), path.display());
        Ok(keywords)
    }

    pub fn from_lines(text: &str) -> Self {
        let entries = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self { entries }
    }

    /// True when any keyword occurs inside `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.entries.iter().any(|kw| text.contains(kw.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
