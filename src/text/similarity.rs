//! String similarity scoring

/// Symmetric similarity between two strings in `[0, 1]`
pub trait Similarity: Send + Sync {
    /// Score `a` against `b`; 1.0 means identical
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Jaro-Winkler similarity (prefix-weighted edit similarity)
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}
