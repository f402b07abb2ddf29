//! Text processing primitives: tokenizing, tagging, similarity and metrics

pub mod keywords;
pub mod readability;
pub mod sentiment;
pub mod similarity;
pub mod tagger;
pub mod tokenizer;

pub use keywords::{MAX_KEYWORDS, extract_local_keywords, is_stop_word, suggestions};
pub use readability::flesch_reading_ease;
pub use sentiment::{Sentiment, Tone, analyze_sentiment};
pub use similarity::{JaroWinkler, Similarity};
pub use tagger::{HeuristicTagger, Tag, Tagger, TextAnalysis, Token, tag_tokens};
pub use tokenizer::{RawToken, tokenize};
