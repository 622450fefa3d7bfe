use log::{debug, info};

use super::StructuredSection;
use crate::chat::{Completion, ModelSettings};
use crate::error::Result;

fn structure_prompt(toc_text: &str) -> String {
    format!(
        "This is the table of contents of a financial annual report. \
         Extract a clean, structured list of section titles with their corresponding page numbers. \
         Avoid repeating company headers. Provide a list in this format:\n\n\
         Section Title | Logical Page Number\n\n\
         Here is the content:\n\n{}",
        toc_text
    )
}

/// Asks the completion service to rewrite raw ToC text as `Title | Page` lines
/// and returns the parsed entries sorted by page.
pub async fn structure_toc(
    completion: &dyn Completion,
    settings: &ModelSettings,
    raw_page_text: &str,
) -> Result<Vec<StructuredSection>> {
    let request = settings.structure_request(structure_prompt(raw_page_text));
    let reply = completion.complete(request).await?;
    let sections = parse_structured_reply(&reply);
    info!("Structured {} sections from completion reply", sections.len());
    Ok(sections)
}

/// Parses `Title | Page` lines, dropping anything that does not fit.
///
/// The sort is stable: entries sharing a page keep their reply order.
pub fn parse_structured_reply(reply: &str) -> Vec<StructuredSection> {
    let mut sections: Vec<StructuredSection> = reply
        .trim()
        .split('\n')
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                debug!("Dropping unstructured reply line: {:?}", line);
            }
            parsed
        })
        .collect();
    sections.sort_by_key(|section| section.page);
    sections
}

fn parse_line(line: &str) -> Option<StructuredSection> {
    let (title, page) = line.split_once('|')?;
    let title = title
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == ' ')
        .trim();
    let digits = page.trim().trim_start_matches('0');
    let page = if digits.is_empty() { 0 } else { digits.parse::<u32>().ok()? };
    Some(StructuredSection {
        title: title.to_string(),
        page,
    })
}
