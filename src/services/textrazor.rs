//! TextRazor keyword extraction

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{KeywordExtractor, check_status, http_client, transport_error};
use crate::config::TextRazorConfig;
use crate::failsafe::{RetryPolicy, with_retry};
use crate::text::is_stop_word;
use crate::{Error, Result};

const SERVICE: &str = "textrazor";

/// TextRazor analysis client
pub struct TextRazorClient {
    client: Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl TextRazorClient {
    /// Create a client, or `None` when no API key is configured
    pub fn from_config(config: &TextRazorConfig, retry: RetryPolicy) -> Result<Option<Self>> {
        let Some(api_key) = config.resolve_key() else {
            return Ok(None);
        };
        Self::new(&config.endpoint, api_key, config.timeout, retry).map(Some)
    }

    /// Create a client for `endpoint`
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(SERVICE, timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            retry,
        })
    }

    async fn analyze_once(&self, text: &str) -> Result<TextRazorResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-textrazor-key", &self.api_key)
            .form(&[("text", text), ("extractors", "topics,words")])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await?;
        response
            .json::<TextRazorResponse>()
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("invalid response: {e}")))
    }
}

#[async_trait]
impl KeywordExtractor for TextRazorClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn extract(&self, text: &str) -> Result<Vec<String>> {
        let parsed = with_retry(&self.retry, SERVICE, || self.analyze_once(text)).await?;
        let keywords = parsed.keywords();
        debug!(count = keywords.len(), "TextRazor keywords");
        Ok(keywords)
    }
}

/// Subset of the TextRazor analysis response
#[derive(Debug, Default, Deserialize)]
pub struct TextRazorResponse {
    #[serde(default)]
    response: Analysis,
}

#[derive(Debug, Default, Deserialize)]
struct Analysis {
    #[serde(default)]
    topics: Vec<Topic>,
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct Topic {
    label: String,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Word {
    token: String,
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    part_of_speech: String,
}

impl TextRazorResponse {
    /// Topic labels, or de-duplicated nouns when there are no topics
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        if !self.response.topics.is_empty() {
            return self
                .response
                .topics
                .iter()
                .map(|t| t.label.clone())
                .collect();
        }

        let mut keywords: Vec<String> = Vec::new();
        let nouns = self
            .response
            .sentences
            .iter()
            .flat_map(|s| &s.words)
            .filter(|w| matches!(w.part_of_speech.as_str(), "NN" | "NNP"))
            .filter(|w| !is_stop_word(&w.lemma));
        for word in nouns {
            if !keywords.contains(&word.token) {
                keywords.push(word.token.clone());
            }
        }
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn topics_win() {
        let parsed: TextRazorResponse = serde_json::from_str(
            r#"{"response": {
                "topics": [{"label": "Search engine optimization", "score": 1.0}, {"label": "Marketing"}],
                "sentences": [{"words": [{"token": "ignored", "lemma": "ignored", "partOfSpeech": "NN"}]}]
            }}"#,
        )
        .unwrap();
        assert_eq!(parsed.keywords(), vec!["Search engine optimization", "Marketing"]);
    }

    #[test]
    fn nouns_when_no_topics() {
        let parsed: TextRazorResponse = serde_json::from_str(
            r#"{"response": {"sentences": [
                {"words": [
                    {"token": "Rust", "lemma": "rust", "partOfSpeech": "NNP"},
                    {"token": "is", "lemma": "be", "partOfSpeech": "VBZ"},
                    {"token": "language", "lemma": "language", "partOfSpeech": "NN"},
                    {"token": "this", "lemma": "this", "partOfSpeech": "NN"},
                    {"token": "About", "lemma": "About", "partOfSpeech": "NNP"}
                ]},
                {"words": [{"token": "Rust", "lemma": "rust", "partOfSpeech": "NNP"}]}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(parsed.keywords(), vec!["Rust", "language"]);
    }

    #[test]
    fn from_config_needs_a_key() {
        let mut config = TextRazorConfig {
            api_key: None,
            ..TextRazorConfig::default()
        };
        let client = TextRazorClient::from_config(&config, RetryPolicy::disabled()).unwrap();
        assert!(client.is_none());

        config.api_key = Some("literal-key".into());
        let client = TextRazorClient::from_config(&config, RetryPolicy::disabled()).unwrap();
        assert!(client.is_some());
    }

    #[test]
    fn empty_response() {
        let parsed: TextRazorResponse = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert!(parsed.keywords().is_empty());
    }
}
