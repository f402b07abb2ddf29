//! Insertion strategies and the fallback chain that runs them
//!
//! Strategies are tried in order; the first that yields an insertion wins.
//! [`Append`] always applies and terminates every chain.

use std::sync::Arc;

use tracing::debug;

use super::anchor::select_anchor;
use super::cache::SimilarityCache;
use super::format::{insert_after_anchor, splice};
use super::offset::anchor_end_offset;
use super::quote::escape_quoted_span;
use super::{InsertionResult, StrategyKind};
use crate::text::tokenizer::SENTENCE_TERMINATORS;
use crate::text::{Similarity, Tagger, tag_tokens};

/// Why a strategy declined to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// The tagger could not analyze the text
    TaggerFailed(String),
    /// No candidate scored above the threshold
    NoAnchor,
    /// The anchor could not be located in the original text
    OffsetNotFound,
    /// The text has no non-blank sentence
    NoSentence,
}

/// Outcome of one strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// The strategy produced an insertion
    Inserted(InsertionResult),
    /// The strategy does not apply; try the next one
    Inapplicable(Skip),
}

/// One way of inserting a keyword
pub trait InsertionStrategy: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Try to insert `keyword` into `text`
    fn attempt(&self, text: &str, keyword: &str) -> Attempt;
}

/// Insert right after the existing word most similar to the keyword
pub struct FuzzyAnchor {
    tagger: Arc<dyn Tagger>,
    similarity: Arc<dyn Similarity>,
    cache: Arc<SimilarityCache>,
}

impl FuzzyAnchor {
    /// Create the strategy from its collaborators
    pub fn new(
        tagger: Arc<dyn Tagger>,
        similarity: Arc<dyn Similarity>,
        cache: Arc<SimilarityCache>,
    ) -> Self {
        Self {
            tagger,
            similarity,
            cache,
        }
    }
}

impl InsertionStrategy for FuzzyAnchor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FuzzyAnchor
    }

    fn attempt(&self, text: &str, keyword: &str) -> Attempt {
        let analysis = match self.tagger.analyze(text) {
            Ok(analysis) => analysis,
            Err(e) => return Attempt::Inapplicable(Skip::TaggerFailed(e.to_string())),
        };
        let tokens = tag_tokens(&analysis);

        let candidates = tokens.iter().filter(|t| t.is_candidate());
        let Some(anchor) = select_anchor(candidates, keyword, self.similarity.as_ref(), &self.cache)
        else {
            return Attempt::Inapplicable(Skip::NoAnchor);
        };
        debug!(anchor = %anchor.token.value, score = anchor.score, "Anchor selected");

        let Some(end) = anchor_end_offset(text, &tokens, anchor.token.index) else {
            return Attempt::Inapplicable(Skip::OffsetNotFound);
        };

        let offset = escape_quoted_span(text, end);
        if offset != end {
            debug!(from = end, to = offset, "Moved insertion out of quoted span");
        }

        Attempt::Inserted(insert_after_anchor(text, offset, keyword))
    }
}

/// Insert after the terminator of the first sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceBoundary;

impl InsertionStrategy for SentenceBoundary {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SentenceBoundary
    }

    fn attempt(&self, text: &str, keyword: &str) -> Attempt {
        let Some(first) = text
            .split(&SENTENCE_TERMINATORS[..])
            .find(|s| !s.trim().is_empty())
            .map(str::trim)
        else {
            return Attempt::Inapplicable(Skip::NoSentence);
        };

        let sentence_end = text.find(first).map_or(0, |start| start + first.len());
        let point = text[sentence_end..]
            .find(&SENTENCE_TERMINATORS[..])
            .map_or(sentence_end, |i| sentence_end + i + 1);

        Attempt::Inserted(splice(
            text,
            point,
            " ",
            keyword,
            "",
            StrategyKind::SentenceBoundary,
        ))
    }
}

/// Append to the trimmed text
#[derive(Debug, Clone, Copy, Default)]
pub struct Append;

impl Append {
    /// Append is total; this is the same as a successful [`attempt`](InsertionStrategy::attempt)
    #[must_use]
    pub fn insert(text: &str, keyword: &str) -> InsertionResult {
        let trimmed = text.trim();
        let separator = if trimmed.is_empty() { "" } else { " " };
        splice(
            trimmed,
            trimmed.len(),
            separator,
            keyword,
            "",
            StrategyKind::Append,
        )
    }
}

impl InsertionStrategy for Append {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Append
    }

    fn attempt(&self, text: &str, keyword: &str) -> Attempt {
        Attempt::Inserted(Self::insert(text, keyword))
    }
}

/// Run `strategies` in order; append if none applies
pub fn run_chain(
    strategies: &[Box<dyn InsertionStrategy>],
    text: &str,
    keyword: &str,
) -> InsertionResult {
    for strategy in strategies {
        match strategy.attempt(text, keyword) {
            Attempt::Inserted(result) => {
                debug!(strategy = ?strategy.kind(), inserted_at = result.inserted_at, "Keyword inserted");
                return result;
            }
            Attempt::Inapplicable(reason) => {
                debug!(strategy = ?strategy.kind(), reason = ?reason, "Strategy inapplicable");
            }
        }
    }
    Append::insert(text, keyword)
}
