use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{Error, Result};

/// Splits a PDF into per-page text. Pages the extractor cannot read come back empty.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
    let pages = without_panics(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| Error::Extraction(format!("PDF extraction failed: {}", e)))
    })?;
    Ok(pages.into_iter().map(clean_page).collect())
}

/// pdf_extract can panic on malformed PDFs; turn that into an extraction error.
fn without_panics<T>(extract: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(extract))
        .unwrap_or_else(|_| Err(Error::Extraction("PDF extraction panicked (malformed PDF)".to_string())))
}

/// Drops control characters but keeps tabs and line breaks, which leader lines rely on.
fn clean_page(text: String) -> String {
    text.replace(|c: char| c == '\r' || (c.is_control() && !c.is_whitespace()), "")
}
