/// Keeps only ASCII letters, digits and spaces, lowercased and trimmed.
///
/// Every comparison between page lines, section titles and gold keywords goes
/// through this so matching ignores case and punctuation.
pub fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}
