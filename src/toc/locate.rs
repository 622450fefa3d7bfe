use log::{debug, info};

use super::keywords::Keywords;
use super::normalize::normalize;
use crate::document::DocumentPages;

pub const DEFAULT_THRESHOLD: usize = 5;

/// Number of lines on `text` that contain at least one gold keyword.
pub fn score_page(text: &str, keywords: &Keywords) -> usize {
    text.split('\n')
        .map(normalize)
        .filter(|line| keywords.matches(line))
        .count()
}

/// Returns the first page (1-indexed) with at least `threshold` keyword lines.
///
/// Pages without text are skipped. The scan stops at the first qualifying
/// page rather than looking for the best one.
pub fn find_toc_page(pages: &DocumentPages, keywords: &Keywords, threshold: usize) -> Option<usize> {
    for (index, text) in pages.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let score = score_page(text, keywords);
        debug!("Page {} scored {} keyword lines", index + 1, score);
        if score >= threshold {
            info!("Table of contents found on page {}", index + 1);
            return Some(index + 1);
        }
    }
    info!("No page reached {} keyword lines", threshold);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Keywords {
        Keywords::from_lines("overview\nstrategic report\ngovernance\nrisk factors\nfinancial statements\nnotes")
    }

    const TOC_PAGE: &str = "Contents\nOverview....2\nStrategic Report....8\nGovernance....30\nRisk Factors....41\nFinancial Statements....60\nNotes....75";

    #[test]
    fn test_only_third_page_qualifies() {
        let pages = DocumentPages::new(vec![
            "Annual Report 2023\nOverview of the group".to_string(),
            "Chairman's letter\nGovernance matters\nRisk factors we face".to_string(),
            TOC_PAGE.to_string(),
        ]);
        assert_eq!(find_toc_page(&pages, &keywords(), 5), Some(3));
    }

    #[test]
    fn test_not_found_below_threshold() {
        let pages = DocumentPages::new(vec![
            "Overview\nGovernance".to_string(),
            String::new(),
            "Notes\nRisk Factors\nStrategic Report\nFinancial statements".to_string(),
        ]);
        assert_eq!(find_toc_page(&pages, &keywords(), DEFAULT_THRESHOLD), None);
    }

    #[test]
    fn test_first_match_wins() {
        let denser = format!("{}\nOverview again\nNotes again", TOC_PAGE);
        let pages = DocumentPages::new(vec![
            String::new(),
            TOC_PAGE.to_string(),
            denser,
        ]);
        assert_eq!(find_toc_page(&pages, &keywords(), 5), Some(2));
    }

    #[test]
    fn test_empty_pages_do_not_stop_scan() {
        let pages = DocumentPages::new(vec![String::new(), String::new(), TOC_PAGE.to_string()]);
        assert_eq!(find_toc_page(&pages, &keywords(), 5), Some(3));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let pages = DocumentPages::new(vec!["Overview\nGovernance".to_string()]);
        assert_eq!(find_toc_page(&pages, &keywords(), 2), Some(1));
        assert_eq!(find_toc_page(&pages, &keywords(), 3), None);
    }

    #[test]
    fn test_score_counts_lines_not_keywords() {
        let text = "Overview and Governance\nNotes";
        assert_eq!(score_page(text, &keywords()), 2);
    }
}
