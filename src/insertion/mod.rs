//! Keyword insertion engine
//!
//! [`KeywordInserter`] places a keyword into existing text and reports where
//! it went. It never fails: if no similar word can anchor the keyword it
//! falls back to the end of the first sentence, and finally to appending.
//!
//! All offsets inside the engine are UTF-8 byte offsets into
//! [`InsertionResult::updated_text`]. The HTTP layer converts them to UTF-16
//! code units for browser clients.

pub mod anchor;
pub mod cache;
pub mod format;
pub mod generative;
pub mod offset;
pub mod quote;
pub mod strategy;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use anchor::{Anchor, select_anchor, threshold_for};
pub use cache::{CachePolicy, CacheStatsSnapshot, SimilarityCache};
pub use format::insert_after_anchor;
pub use offset::anchor_end_offset;
pub use quote::{escape_quoted_span, inside_quotes};
pub use strategy::{
    Append, Attempt, FuzzyAnchor, InsertionStrategy, SentenceBoundary, Skip, run_chain,
};

use crate::text::{HeuristicTagger, JaroWinkler, Similarity, Tagger};

/// Which strategy produced an insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// After the most similar existing word
    FuzzyAnchor,
    /// After the first sentence terminator
    SentenceBoundary,
    /// At the end of the trimmed text
    Append,
    /// Rewritten by a generative model
    Generative,
}

/// How a caller wants the keyword inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionMode {
    /// The local fuzzy engine
    #[default]
    Fuzzy,
    /// A generative model rewrite, degrading to `Fuzzy`
    Generative,
}

/// Result of inserting a keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionResult {
    /// Text with the keyword in place
    pub updated_text: String,
    /// Byte offset of the keyword's first character in `updated_text`
    pub inserted_at: usize,
    /// Length of the keyword in bytes
    pub keyword_len: usize,
    /// Strategy that produced this result
    pub strategy: StrategyKind,
}

impl InsertionResult {
    /// The inserted keyword as it appears in `updated_text`
    #[must_use]
    pub fn highlighted(&self) -> &str {
        self.updated_text
            .get(self.inserted_at..self.inserted_at + self.keyword_len)
            .unwrap_or_default()
    }

    /// `inserted_at` in UTF-16 code units
    #[must_use]
    pub fn utf16_inserted_at(&self) -> usize {
        utf16_len(self.updated_text.get(..self.inserted_at).unwrap_or_default())
    }

    /// `keyword_len` in UTF-16 code units
    #[must_use]
    pub fn utf16_keyword_len(&self) -> usize {
        utf16_len(self.highlighted())
    }
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Inserts keywords with the fuzzy anchor engine and its fallbacks
pub struct KeywordInserter {
    strategies: Vec<Box<dyn InsertionStrategy>>,
    cache: Arc<SimilarityCache>,
}

impl KeywordInserter {
    /// Engine with the built-in tagger and Jaro-Winkler similarity
    #[must_use]
    pub fn new(cache: Arc<SimilarityCache>) -> Self {
        Self::with_components(Arc::new(HeuristicTagger), Arc::new(JaroWinkler), cache)
    }

    /// Engine with a custom tagger and similarity function
    #[must_use]
    pub fn with_components(
        tagger: Arc<dyn Tagger>,
        similarity: Arc<dyn Similarity>,
        cache: Arc<SimilarityCache>,
    ) -> Self {
        let strategies: Vec<Box<dyn InsertionStrategy>> = vec![
            Box::new(FuzzyAnchor::new(tagger, similarity, Arc::clone(&cache))),
            Box::new(SentenceBoundary),
            Box::new(Append),
        ];
        Self { strategies, cache }
    }

    /// Insert `keyword` into `text`
    #[must_use]
    pub fn insert(&self, text: &str, keyword: &str) -> InsertionResult {
        run_chain(&self.strategies, text, keyword)
    }

    /// The similarity cache shared by this engine
    #[must_use]
    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }
}

impl Default for KeywordInserter {
    fn default() -> Self {
        Self::new(Arc::new(SimilarityCache::default()))
    }
}

impl std::fmt::Debug for KeywordInserter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.strategies.iter().map(|s| s.kind()).collect();
        f.debug_struct("KeywordInserter")
            .field("strategies", &kinds)
            .field("cache", &self.cache)
            .finish()
    }
}
