//! Flesch reading-ease score

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]").expect("sentence pattern is valid"));
static VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[aeiouy]+").expect("vowel pattern is valid"));

/// Number of pieces `re` splits `text` into (separators + 1)
fn pieces(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count() + 1
}

/// Flesch reading ease, rounded to the nearest integer.
///
/// Words, sentences and syllables are approximated by splitting on
/// whitespace runs, sentence punctuation and vowel groups respectively,
/// so the score is comparable across inputs but not linguistically exact.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn flesch_reading_ease(text: &str) -> i64 {
    let words = pieces(&WHITESPACE, text) as f64;
    let sentences = pieces(&SENTENCE_END, text) as f64;
    let syllables = pieces(&VOWEL_GROUP, text) as f64;

    (206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_simple_sentence() {
        // 4 words, 2 sentence pieces, 5 syllable pieces
        // 206.835 - 1.015 * 2 - 84.6 * 1.25 = 99.055
        assert_eq!(flesch_reading_ease("The cat sat down."), 99);
    }

    #[test]
    fn denser_text_scores_lower() {
        let simple = flesch_reading_ease("The dog ran. The cat sat.");
        let dense = flesch_reading_ease(
            "Comprehensive optimization methodologies necessitate considerable organizational investment.",
        );
        assert!(dense < simple);
    }

    #[test]
    fn empty_text_does_not_divide_by_zero() {
        // one word piece, one sentence piece, one syllable piece
        assert_eq!(flesch_reading_ease(""), 121);
    }
}
