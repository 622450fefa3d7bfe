use serde::{Deserialize, Serialize};

use crate::document::chunk::equal_chunks;
use crate::document::DocumentPages;

/// Keywords a user follows through one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordTracker {
    keywords: Vec<String>,
}

impl KeywordTracker {
    /// Returns false for blank or already tracked words.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() || self.keywords.contains(&word) {
            return false;
        }
        self.keywords.push(word);
        true
    }

    pub fn remove(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        let before = self.keywords.len();
        self.keywords.retain(|kw| *kw != word);
        self.keywords.len() != before
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
    }

    /// Tracks every whitespace-separated word of `text`, returning how many were new.
    pub fn import(&mut self, text: &str) -> usize {
        text.split_whitespace().filter(|word| self.add(word)).count()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Occurrences of one keyword in each slice of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTrend {
    pub keyword: String,
    pub counts: Vec<usize>,
}

impl KeywordTrend {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Counts each keyword across `chunks` equal slices of the lowercased report.
pub fn trend(pages: &DocumentPages, keywords: &[String], chunks: usize) -> Vec<KeywordTrend> {
    let text = pages.joined().to_lowercase();
    let slices = equal_chunks(&text, chunks);
    keywords
        .iter()
        .map(|keyword| KeywordTrend {
            keyword: keyword.clone(),
            counts: slices
                .iter()
                .map(|slice| slice.content.matches(keyword.as_str()).count())
                .collect(),
        })
        .collect()
}

/// (keyword, total) pairs, most frequent first.
pub fn frequency_table(trends: &[KeywordTrend]) -> Vec<(String, usize)> {
    let mut table: Vec<(String, usize)> = trends
        .iter()
        .map(|t| (t.keyword.clone(), t.total()))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_dedupes_and_lowercases() {
        let mut tracker = KeywordTracker::default();
        assert!(tracker.add("Revenue"));
        assert!(!tracker.add(" revenue "));
        assert!(!tracker.add("   "));
        assert!(tracker.add("dividend"));
        assert_eq!(tracker.keywords(), &["revenue".to_string(), "dividend".to_string()]);

        assert!(tracker.remove("REVENUE"));
        assert!(!tracker.remove("ebitda"));
        assert_eq!(tracker.keywords().len(), 1);

        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_import_counts_new_words() {
        let mut tracker = KeywordTracker::default();
        tracker.add("risk");
        assert_eq!(tracker.import("Risk climate\nclimate  ESG\n"), 2);
        assert_eq!(tracker.keywords(), &["risk".to_string(), "climate".to_string(), "esg".to_string()]);
    }

    #[test]
    fn test_trend_counts_per_slice() {
        let pages = DocumentPages::new(vec!["Risk risk".to_string(), "RISK sales".to_string()]);
        // "risk risk\nrisk sales" is 20 chars: two slices of 10
        let trends = trend(&pages, &["risk".to_string(), "sales".to_string()], 2);
        assert_eq!(trends[0].counts, vec![2, 1]);
        assert_eq!(trends[1].counts, vec![0, 1]);
        assert_eq!(trends[0].total(), 3);
    }

    #[test]
    fn test_short_text_counts_zero() {
        let pages = DocumentPages::new(vec!["risk".to_string()]);
        let trends = trend(&pages, &["risk".to_string()], 100);
        assert_eq!(trends[0].counts.len(), 100);
        assert_eq!(trends[0].total(), 0);
    }

    #[test]
    fn test_frequency_table_sorted_desc() {
        let trends = vec![
            KeywordTrend { keyword: "a".to_string(), counts: vec![1, 0] },
            KeywordTrend { keyword: "b".to_string(), counts: vec![3, 2] },
            KeywordTrend { keyword: "c".to_string(), counts: vec![0, 1] },
        ];
        assert_eq!(
            frequency_table(&trends),
            vec![("b".to_string(), 5), ("a".to_string(), 1), ("c".to_string(), 1)]
        );
    }
}
