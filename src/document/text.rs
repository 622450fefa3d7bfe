const FORM_FEED: char = '\u{c}';

/// Decodes UTF-8, silently dropping invalid byte sequences.
pub fn decode_ignoring_errors(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Plain-text reports use form feeds as page breaks; without any the whole file is one page.
pub fn extract_pages(bytes: &[u8]) -> Vec<String> {
    let content = decode_ignoring_errors(bytes);
    content
        .split(FORM_FEED)
        .map(|page| page.replace('\r', ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_feed_pages() {
        let pages = extract_pages(b"Cover\x0cContents\r\nOverview....3\x0c");
        assert_eq!(pages, vec!["Cover", "Contents\nOverview....3", ""]);
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        assert_eq!(decode_ignoring_errors(b"\xffgovernance \xe2\x80report"), "governance report");
        assert_eq!(decode_ignoring_errors("caf\u{e9}".as_bytes()), "caf\u{e9}");
    }

    #[test]
    fn test_single_page() {
        assert_eq!(extract_pages(b"just text").len(), 1);
    }
}
