use log::{info, warn};

use crate::chat::{Completion, ModelSettings};
use crate::document::DocumentPages;
use crate::error::{Error, Result};

fn answer_prompt(question: &str, content: &str) -> String {
    format!(
        "You are reading part of a financial annual report. \
         Answer the following question based only on the content provided.\n\n\
         Question: {}\n\nContent:\n{}",
        question, content
    )
}

/// Answers `question` from pages `start_page..=end_page` (1-indexed).
///
/// The reply is returned as the service produced it. An inverted range still
/// sends the question, with no content.
pub async fn answer(
    completion: &dyn Completion,
    settings: &ModelSettings,
    pages: &DocumentPages,
    start_page: usize,
    end_page: usize,
    question: &str,
) -> Result<String> {
    if start_page == 0 {
        return Err(Error::InvalidPageRange { start: start_page, end: end_page });
    }
    if start_page > end_page {
        warn!("Inverted page range {}..{}: asking without document content", start_page, end_page);
    }

    let content = pages.window(start_page, end_page);
    info!("Answering from pages {}-{} ({} chars)", start_page, end_page, content.len());
    completion
        .complete(settings.answer_request(answer_prompt(question, &content)))
        .await
}
