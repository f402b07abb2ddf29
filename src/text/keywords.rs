//! Local keyword extraction and keyword suggestions

/// Maximum number of keywords reported to clients
pub const MAX_KEYWORDS: usize = 5;

/// Words never suggested as keywords
pub const STOP_WORDS: &[&str] = &["this", "is", "a", "an", "the", "about", "in", "on", "at", "to"];

/// Returns true for stop words (case-insensitive)
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// Keyword extraction used when no remote extractor is available.
///
/// Whitespace-separated words longer than three characters that are not
/// stop words, with surrounding punctuation trimmed, first occurrence wins.
#[must_use]
pub fn extract_local_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if word.chars().count() <= 3 || is_stop_word(word) {
            continue;
        }
        if keywords.iter().any(|k| k.eq_ignore_ascii_case(word)) {
            continue;
        }
        keywords.push(word.to_string());
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

/// Human-readable suggestion line for `keywords`
#[must_use]
pub fn suggestions(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "No suggestions available.".to_string()
    } else {
        format!("Consider adding keywords: {}", keywords.join(", "))
    }
}
