//! Splicing the keyword into the text with punctuation-aware spacing

use super::{InsertionResult, StrategyKind};
use crate::text::tokenizer::PUNCTUATION;

/// Insert `prefix + keyword + suffix` at byte `offset`
pub(crate) fn splice(
    text: &str,
    offset: usize,
    prefix: &str,
    keyword: &str,
    suffix: &str,
    strategy: StrategyKind,
) -> InsertionResult {
    let mut updated = String::with_capacity(text.len() + prefix.len() + keyword.len() + suffix.len());
    updated.push_str(&text[..offset]);
    updated.push_str(prefix);
    updated.push_str(keyword);
    updated.push_str(suffix);
    updated.push_str(&text[offset..]);

    InsertionResult {
        updated_text: updated,
        inserted_at: offset + prefix.len(),
        keyword_len: keyword.len(),
        strategy,
    }
}

/// Insert `keyword` after the anchor ending at `offset`.
///
/// A leading space always separates the keyword from the anchor. A trailing
/// space is added only when the next character is a word character; before
/// `, . ! ?`, whitespace or the end of text the keyword is left flush.
#[must_use]
pub fn insert_after_anchor(text: &str, offset: usize, keyword: &str) -> InsertionResult {
    let suffix = match text[offset..].chars().next() {
        Some(c) if PUNCTUATION.contains(&c) || c.is_whitespace() => "",
        Some(_) => " ",
        None => "",
    };
    splice(text, offset, " ", keyword, suffix, StrategyKind::FuzzyAnchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn before_space_reuses_existing_space() {
        let r = insert_after_anchor("The fox jumps", 7, "dog");
        assert_eq!(r.updated_text, "The fox dog jumps");
        assert_eq!(r.highlighted(), "dog");
    }

    #[test]
    fn before_punctuation_has_no_trailing_space() {
        for mark in [",", ".", "!", "?"] {
            let text = format!("I like rust{mark} Yes");
            let r = insert_after_anchor(&text, 11, "lang");
            assert_eq!(r.updated_text, format!("I like rust lang{mark} Yes"));
            assert_eq!(r.inserted_at, 12);
        }
    }

    #[test]
    fn before_word_character_adds_trailing_space() {
        let r = insert_after_anchor(r#"said "hi"there"#, 9, "kw");
        assert_eq!(r.updated_text, r#"said "hi" kw there"#);
        assert_eq!(r.highlighted(), "kw");
    }

    #[test]
    fn at_end_of_text() {
        let r = insert_after_anchor("growth", 6, "marketing");
        assert_eq!(r.updated_text, "growth marketing");
        assert_eq!(r.inserted_at, 7);
        assert_eq!(r.keyword_len, 9);
    }
}
