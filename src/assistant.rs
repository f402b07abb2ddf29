//! Request-level operations: text analysis and keyword insertion
//!
//! [`Assistant`] combines the local engine with whichever remote services
//! are configured. Remote failures never fail a request: extraction falls
//! back to the local extractor and generative insertion to the fuzzy engine.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::failsafe::RetryPolicy;
use crate::insertion::generative::locate_in_reply;
use crate::insertion::{InsertionMode, InsertionResult, KeywordInserter, SimilarityCache};
use crate::services::{GeminiClient, GenerativeInserter, KeywordExtractor, TextRazorClient};
use crate::text::{
    MAX_KEYWORDS, Sentiment, analyze_sentiment, extract_local_keywords, flesch_reading_ease,
    suggestions,
};
use crate::{Error, Result};

/// SEO metrics for a piece of text
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Up to five keywords
    pub keywords: Vec<String>,
    /// Flesch reading ease
    pub readability: i64,
    /// Keyword advice
    pub suggestions: String,
    /// Sentiment score and tone
    pub sentiment: Sentiment,
    /// The analyzed text, unchanged
    pub updated_text: String,
}

/// The assistant's operations, shared by the HTTP server and the CLI
pub struct Assistant {
    inserter: Arc<KeywordInserter>,
    extractor: Option<Arc<dyn KeywordExtractor>>,
    generator: Option<Arc<dyn GenerativeInserter>>,
    default_mode: InsertionMode,
}

impl Assistant {
    /// Assistant with only the local engine
    #[must_use]
    pub fn new(inserter: Arc<KeywordInserter>) -> Self {
        Self {
            inserter,
            extractor: None,
            generator: None,
            default_mode: InsertionMode::Fuzzy,
        }
    }

    /// Build the assistant and its remote clients from configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] when an HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(SimilarityCache::new(
            config.insertion.cache.policy,
            config.insertion.cache.capacity,
        ));
        let retry = RetryPolicy::new(&config.retry);

        let mut assistant = Self::new(Arc::new(KeywordInserter::new(cache)))
            .with_default_mode(config.insertion.default_mode);

        match TextRazorClient::from_config(&config.textrazor, retry.clone())? {
            Some(client) => assistant = assistant.with_extractor(Arc::new(client)),
            None => warn!("TEXTRAZOR_API_KEY is not set; using local keyword extraction"),
        }
        match GeminiClient::from_config(&config.gemini, retry)? {
            Some(client) => assistant = assistant.with_generator(Arc::new(client)),
            None => warn!("GEMINI_API_KEY is not set; generative insertion uses the fuzzy engine"),
        }

        Ok(assistant)
    }

    /// Use `extractor` for keyword extraction
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn KeywordExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Use `generator` for generative insertion
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn GenerativeInserter>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Mode used when a request names none
    #[must_use]
    pub fn with_default_mode(mut self, mode: InsertionMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Whether a keyword extraction service is configured
    #[must_use]
    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    /// Whether a generative service is configured
    #[must_use]
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// The local insertion engine
    #[must_use]
    pub fn inserter(&self) -> &KeywordInserter {
        &self.inserter
    }

    /// Keywords, readability, sentiment and suggestions for `text`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `text` is empty.
    pub async fn analyze(&self, text: &str) -> Result<Analysis> {
        if text.is_empty() {
            return Err(Error::InvalidInput("Text is required".into()));
        }

        let mut keywords = self.keywords(text).await;
        keywords.truncate(MAX_KEYWORDS);

        Ok(Analysis {
            suggestions: suggestions(&keywords),
            keywords,
            readability: flesch_reading_ease(text),
            sentiment: analyze_sentiment(text),
            updated_text: text.to_string(),
        })
    }

    async fn keywords(&self, text: &str) -> Vec<String> {
        let Some(extractor) = &self.extractor else {
            return extract_local_keywords(text);
        };
        match extractor.extract(text).await {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!(service = extractor.name(), error = %e, "Keyword extraction failed; using local extraction");
                extract_local_keywords(text)
            }
        }
    }

    /// Insert `keyword` into `text` using `mode` (or the default mode)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `text` or `keyword` is empty.
    pub async fn insert(
        &self,
        text: &str,
        keyword: &str,
        mode: Option<InsertionMode>,
    ) -> Result<InsertionResult> {
        if text.is_empty() || keyword.is_empty() {
            return Err(Error::InvalidInput("Text and keyword are required".into()));
        }

        let mode = mode.unwrap_or(self.default_mode);
        if mode == InsertionMode::Generative {
            if let Some(generator) = &self.generator {
                match generator.rewrite(text, keyword).await {
                    Ok(reply) => return Ok(locate_in_reply(text, &reply, keyword)),
                    Err(e) => {
                        warn!(service = generator.name(), error = %e, "Generative insertion failed; using fuzzy engine");
                    }
                }
            }
        }

        let result = self.inserter.insert(text, keyword);
        info!(strategy = ?result.strategy, inserted_at = result.inserted_at, "Keyword inserted");
        Ok(result)
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("inserter", &self.inserter)
            .field("extractor", &self.extractor.as_ref().map(|e| e.name()))
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("default_mode", &self.default_mode)
            .finish()
    }
}
