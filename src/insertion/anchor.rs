//! Anchor selection: the existing word most similar to the keyword

use tracing::trace;

use super::cache::SimilarityCache;
use crate::text::{Similarity, Token};

/// Similarity bar for keywords of at most [`SHORT_KEYWORD_CHARS`] characters
pub const SHORT_KEYWORD_THRESHOLD: f64 = 0.6;

/// Similarity bar for longer keywords
pub const LONG_KEYWORD_THRESHOLD: f64 = 0.45;

/// Keywords up to this many characters use the stricter threshold
pub const SHORT_KEYWORD_CHARS: usize = 3;

/// Chosen anchor and its score
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor<'a> {
    /// Token the keyword will follow
    pub token: &'a Token,
    /// Similarity between the token and the keyword
    pub score: f64,
}

/// Minimum score (exclusive) a candidate needs to anchor `keyword`
#[must_use]
pub fn threshold_for(keyword: &str) -> f64 {
    if keyword.chars().count() <= SHORT_KEYWORD_CHARS {
        SHORT_KEYWORD_THRESHOLD
    } else {
        LONG_KEYWORD_THRESHOLD
    }
}

/// Pick the candidate scoring strictly above both the running best and the
/// threshold. Candidates are visited left to right, so ties keep the earliest.
pub fn select_anchor<'a>(
    candidates: impl IntoIterator<Item = &'a Token>,
    keyword: &str,
    similarity: &dyn Similarity,
    cache: &SimilarityCache,
) -> Option<Anchor<'a>> {
    let threshold = threshold_for(keyword);
    let keyword_lower = keyword.to_lowercase();

    let mut best: Option<Anchor<'a>> = None;
    let mut best_score = 0.0;

    for token in candidates {
        let word = token.value.to_lowercase();
        let score = cache.get_or_insert_with(&word, &keyword_lower, || {
            similarity.score(&word, &keyword_lower)
        });
        trace!(candidate = %word, keyword = %keyword_lower, score, tag = ?token.tag, "Scored candidate");

        if score > best_score && score > threshold {
            best_score = score;
            best = Some(Anchor { token, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tag;

    /// Scores looked up from a fixed table, 0.0 otherwise
    struct Table(Vec<(&'static str, f64)>);

    impl Similarity for Table {
        fn score(&self, a: &str, _b: &str) -> f64 {
            self.0
                .iter()
                .find(|(w, _)| *w == a)
                .map_or(0.0, |(_, s)| *s)
        }
    }

    fn noun(value: &str, index: usize) -> Token {
        Token {
            value: value.to_string(),
            tag: Tag::Noun,
            index,
            span: None,
        }
    }

    #[test]
    fn threshold_depends_on_keyword_length() {
        assert!((threshold_for("dog") - 0.6).abs() < f64::EPSILON);
        assert!((threshold_for("dogs") - 0.45).abs() < f64::EPSILON);
        // counted in characters, not bytes
        assert!((threshold_for("ñño") - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn score_equal_to_threshold_is_rejected() {
        let tokens = vec![noun("cat", 0)];
        let sim = Table(vec![("cat", 0.6)]);
        let cache = SimilarityCache::disabled();
        assert!(select_anchor(&tokens, "dog", &sim, &cache).is_none());
    }

    #[test]
    fn score_just_above_threshold_is_selected() {
        let tokens = vec![noun("cat", 0), noun("cot", 1)];
        let sim = Table(vec![("cat", 0.6), ("cot", 0.600_01)]);
        let cache = SimilarityCache::disabled();
        let anchor = select_anchor(&tokens, "dog", &sim, &cache).unwrap();
        assert_eq!(anchor.token.value, "cot");
    }

    #[test]
    fn ties_keep_earliest() {
        let tokens = vec![noun("market", 0), noun("Market", 1)];
        let sim = Table(vec![("market", 0.9)]);
        let cache = SimilarityCache::disabled();
        let anchor = select_anchor(&tokens, "marketing", &sim, &cache).unwrap();
        assert_eq!(anchor.token.index, 0);
    }

    #[test]
    fn highest_score_wins() {
        let tokens = vec![noun("alpha", 0), noun("beta", 1), noun("gamma", 2)];
        let sim = Table(vec![("alpha", 0.5), ("beta", 0.8), ("gamma", 0.7)]);
        let cache = SimilarityCache::disabled();
        let anchor = select_anchor(&tokens, "keyword", &sim, &cache).unwrap();
        assert_eq!(anchor.token.value, "beta");
        assert!((anchor.score - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn cache_hit_skips_scorer() {
        struct Panics;
        impl Similarity for Panics {
            fn score(&self, _: &str, _: &str) -> f64 {
                panic!("scorer must not be called on a cache hit")
            }
        }

        let tokens = vec![noun("Search", 0)];
        let cache = SimilarityCache::unbounded();
        cache.put("search", "seo", 0.9);
        let anchor = select_anchor(&tokens, "SEO", &Panics, &cache).unwrap();
        assert_eq!(anchor.token.value, "Search");
    }
}
