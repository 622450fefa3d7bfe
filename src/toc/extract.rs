use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::keywords::Keywords;
use super::normalize::normalize;
use super::CandidateSection;
use crate::document::DocumentPages;

/// `<title><leader><page>`: leader is 2+ dots or 2+ whitespace, page is 1-3 digits at line end.
static LEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(\.{2,}|\s{2,})(\d{1,3})$").expect("valid leader pattern"));

/// Parses one table-of-contents line into its raw title and reported page.
pub fn parse_leader_line(line: &str) -> Option<(&str, u32)> {
    let caps = LEADER_LINE.captures(line.trim())?;
    let title = caps.get(1)?.as_str().trim();
    let page = caps.get(3)?.as_str().parse::<u32>().ok()?;
    Some((title, page))
}

/// Recovers (title, reported page) pairs from the table-of-contents page.
///
/// Only lines whose normalized title contains a gold keyword are kept. Page
/// resolution against the PDF's physical pages is not attempted.
pub fn extract_sections(pages: &DocumentPages, toc_page: usize, keywords: &Keywords) -> Vec<CandidateSection> {
    let text = pages.page(toc_page);
    let mut sections = Vec::new();

    for line in text.split('\n') {
        let Some((title, reported_page)) = parse_leader_line(line) else {
            continue;
        };
        if !keywords.matches(&normalize(title)) {
            debug!("Skipping ToC line without gold keyword: {:?}", title);
            continue;
        }
        sections.push(CandidateSection {
            section_title: title.to_string(),
            reported_page,
            resolved_page: None,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_page(text: &str) -> DocumentPages {
        DocumentPages::new(vec![text.to_string()])
    }

    #[test]
    fn test_dotted_leader() {
        let keywords = Keywords::from_lines("risk factors");
        let sections = extract_sections(&single_page("Risk Factors....................23"), 1, &keywords);
        assert_eq!(
            sections,
            vec![CandidateSection {
                section_title: "Risk Factors".to_string(),
                reported_page: 23,
                resolved_page: None,
            }]
        );
    }

    #[test]
    fn test_single_dot_does_not_match() {
        let keywords = Keywords::from_lines("risk factors");
        assert!(extract_sections(&single_page("Risk Factors.23"), 1, &keywords).is_empty());
        assert_eq!(parse_leader_line("Risk Factors.23"), None);
    }

    #[test]
    fn test_spaced_leader() {
        assert_eq!(parse_leader_line("Directors' Report    112"), Some(("Directors' Report", 112)));
        assert_eq!(parse_leader_line("  Governance\t\t7  "), Some(("Governance", 7)));
    }

    #[test]
    fn test_page_must_be_short_and_terminal() {
        assert_eq!(parse_leader_line("Five-year summary....1024"), None);
        assert_eq!(parse_leader_line("Overview....12 continued"), None);
    }

    #[test]
    fn test_filters_by_keyword_keeping_raw_title() {
        let keywords = Keywords::from_lines("chairmans statement\nnotes");
        let page = "Contents\nChairman's Statement....4\nPhotography credits....99\nNotes to the Accounts  88";
        let sections = extract_sections(&single_page(page), 1, &keywords);
        let titles: Vec<(&str, u32)> = sections
            .iter()
            .map(|s| (s.section_title.as_str(), s.reported_page))
            .collect();
        assert_eq!(titles, vec![("Chairman's Statement", 4), ("Notes to the Accounts", 88)]);
        assert!(sections.iter().all(|s| s.resolved_page.is_none()));
    }

    #[test]
    fn test_missing_page_yields_nothing() {
        let keywords = Keywords::from_lines("overview");
        assert!(extract_sections(&single_page("Overview....3"), 4, &keywords).is_empty());
    }
}
