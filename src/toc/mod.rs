//! Table-of-contents detection and structuring.
//!
//! The locator finds the contents page by keyword density, then two
//! independent readings of that page are produced: a line-pattern parse
//! filtered by gold keywords, and a completion-structured list sorted by page.

pub mod extract;
pub mod keywords;
pub mod locate;
pub mod normalize;
pub mod structure;

use serde::{Deserialize, Serialize};

use crate::chat::{Completion, ModelSettings};
use crate::document::DocumentPages;
use crate::error::Result;

pub use extract::extract_sections;
pub use keywords::Keywords;
pub use locate::{find_toc_page, DEFAULT_THRESHOLD};
pub use structure::structure_toc;

/// A section recovered from a `title....page` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSection {
    pub section_title: String,
    pub reported_page: u32,
    /// Physical PDF page for `reported_page`. Never resolved yet.
    pub resolved_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSection {
    pub title: String,
    pub page: u32,
}

/// Both readings of the contents page, kept side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TocResult {
    pub candidates: Vec<CandidateSection>,
    /// Sorted ascending by page.
    pub sections: Vec<StructuredSection>,
}

impl TocResult {
    /// Page of the structured section titled `title`; a repeated title resolves to its last entry.
    pub fn page_of(&self, title: &str) -> Option<u32> {
        let title = title.trim();
        self.sections
            .iter()
            .rev()
            .find(|section| section.title == title)
            .map(|section| section.page)
    }
}

/// Characters of page text returned for one section.
pub const SECTION_TEXT_LIMIT: usize = 5000;

/// Text of the page a structured section starts on, flattened to a single line.
///
/// A title missing from the contents falls back to page 1.
pub fn section_text(pages: &DocumentPages, toc: &TocResult, title: &str) -> String {
    let page = toc.page_of(title).unwrap_or_else(|| {
        log::warn!("Section {:?} is not in the contents, using page 1", title);
        1
    });
    pages
        .page(page as usize)
        .replace('\n', " ")
        .chars()
        .take(SECTION_TEXT_LIMIT)
        .collect()
}

pub async fn build_toc(
    completion: &dyn Completion,
    settings: &ModelSettings,
    pages: &DocumentPages,
    toc_page: usize,
    keywords: &Keywords,
) -> Result<TocResult> {
    let candidates = extract_sections(pages, toc_page, keywords);
    log::info!("Line pattern matched {} candidate sections on page {}", candidates.len(), toc_page);
    let sections = structure_toc(completion, settings, pages.page(toc_page)).await?;
    Ok(TocResult { candidates, sections })
}
