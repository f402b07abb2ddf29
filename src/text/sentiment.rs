//! Lexicon-based sentiment scoring (AFINN-165 valences, English stemming)

use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;

use super::tokenizer::{is_punctuation, tokenize};

/// Overall tone of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    /// Average valence above zero
    Positive,
    /// Average valence below zero
    Negative,
    /// Zero average valence
    Neutral,
}

/// Sentiment result reported by `/analyze`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// Average valence per word
    pub score: f64,
    /// Tone derived from the score
    pub tone: Tone,
    /// Writing advice for the tone
    pub suggestion: &'static str,
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "won't",
    "can't", "cannot", "nothing", "nobody",
];

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// AFINN-165 valence of a single lowercase word
fn afinn(word: &str) -> Option<f64> {
    let score = f64::from(::sentiment::analyze(word.to_owned()).score);
    (score.abs() > f64::EPSILON).then_some(score)
}

/// Valence of `word`, retried on its stem when the inflected form is unlisted
fn valence(word: &str) -> Option<f64> {
    afinn(word).or_else(|| {
        let stem = STEMMER.stem(word);
        (stem != word).then(|| afinn(&stem)).flatten()
    })
}

/// Average valence of the words in `text`.
///
/// A negation flips the sign of the next word that carries a valence.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sentiment_score(text: &str) -> f64 {
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_punctuation(&t.value))
        .map(|t| t.value.to_lowercase())
        .collect();
    if words.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    let mut negate = false;
    for word in &words {
        if NEGATIONS.contains(&word.as_str()) {
            negate = true;
            continue;
        }
        if let Some(v) = valence(word) {
            total += if negate { -v } else { v };
            negate = false;
        }
    }

    total / words.len() as f64
}

/// Score `text` and derive tone and advice
#[must_use]
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let score = sentiment_score(text);
    let tone = if score > 0.0 {
        Tone::Positive
    } else if score < 0.0 {
        Tone::Negative
    } else {
        Tone::Neutral
    };
    let suggestion = if score < 0.0 {
        "Consider using more positive language to improve engagement."
    } else {
        "Your tone is engaging!"
    };
    Sentiment {
        score,
        tone,
        suggestion,
    }
}
