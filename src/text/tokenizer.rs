//! Word tokenizer that remembers where each token came from
//!
//! Tokens are produced from Unicode word boundaries (UAX #29). Words keep
//! their apostrophes (`don't`, `fox's`), the sentence punctuation marks
//! `. , ! ?` are emitted as their own tokens, and whitespace plus any other
//! symbol is dropped.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Punctuation marks emitted as standalone tokens
pub const PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Marks that terminate a sentence
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// A token as produced by a tokenizer, before tagging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// Token text
    pub value: String,
    /// Byte range of the token in the source text, when known
    pub span: Option<Range<usize>>,
}

impl RawToken {
    /// Token with a known source span
    pub fn new(value: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            value: value.into(),
            span: Some(span),
        }
    }

    /// Token from a tokenizer that does not report spans
    pub fn without_span(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }
}

/// Returns true when `token` is exactly one of `. , ! ?`
#[must_use]
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION.contains(&c))
}

/// Split `text` into word and punctuation tokens with their byte spans.
#[must_use]
pub fn tokenize(text: &str) -> Vec<RawToken> {
    text.split_word_bound_indices()
        .filter(|(_, segment)| {
            is_punctuation(segment) || segment.chars().any(char::is_alphanumeric)
        })
        .map(|(start, segment)| RawToken::new(segment, start..start + segment.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn punctuation_is_split_into_own_tokens() {
        assert_eq!(
            values("The quick fox jumps. It runs, fast!"),
            vec!["The", "quick", "fox", "jumps", ".", "It", "runs", ",", "fast", "!"]
        );
    }

    #[test]
    fn quotes_and_symbols_are_dropped() {
        assert_eq!(
            values(r#"She said "hello world" -- to him."#),
            vec!["She", "said", "hello", "world", "to", "him", "."]
        );
    }

    #[test]
    fn contractions_stay_whole() {
        assert_eq!(values("don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn spans_point_back_into_source() {
        let text = "Ünïcode  words, here.";
        for token in tokenize(text) {
            let span = token.span.clone().unwrap();
            assert_eq!(&text[span], token.value);
        }
    }

    #[test]
    fn empty_and_blank_text_produce_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn is_punctuation_only_matches_single_marks() {
        assert!(is_punctuation("."));
        assert!(is_punctuation("?"));
        assert!(!is_punctuation(".."));
        assert!(!is_punctuation(";"));
        assert!(!is_punctuation("a"));
        assert!(!is_punctuation(""));
    }
}
