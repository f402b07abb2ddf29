//! Gemini `generateContent` client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerativeInserter, check_status, http_client, transport_error};
use crate::config::GeminiConfig;
use crate::failsafe::{RetryPolicy, with_retry};
use crate::insertion::generative::build_prompt;
use crate::{Error, Result};

const SERVICE: &str = "gemini";

/// Gemini client
pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
    max_output_tokens: u32,
    temperature: f32,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Create a client, or `None` when no API key is configured
    pub fn from_config(config: &GeminiConfig, retry: RetryPolicy) -> Result<Option<Self>> {
        let Some(api_key) = config.resolve_key() else {
            return Ok(None);
        };
        Ok(Some(Self {
            client: http_client(SERVICE, config.timeout)?,
            url: generate_url(&config.endpoint, &config.model),
            api_key,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            retry,
        }))
    }

    /// Create a client against `endpoint` with default generation settings
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let defaults = GeminiConfig::default();
        Ok(Self {
            client: http_client(SERVICE, timeout)?,
            url: generate_url(endpoint, model),
            api_key: api_key.into(),
            max_output_tokens: defaults.max_output_tokens,
            temperature: defaults.temperature,
            retry: RetryPolicy::disabled(),
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn generate_once(&self, request: &GenerateRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await?;
        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("invalid response: {e}")))?;

        parsed
            .text()
            .ok_or_else(|| Error::upstream(SERVICE, "response has no text candidate"))
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{model}:generateContent",
        endpoint.trim_end_matches('/')
    )
}

#[async_trait]
impl GenerativeInserter for GeminiClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn rewrite(&self, text: &str, keyword: &str) -> Result<String> {
        let prompt = build_prompt(text, keyword);
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        };

        let reply = with_retry(&self.retry, SERVICE, || self.generate_once(&request)).await?;
        debug!(reply_len = reply.len(), "Gemini reply");
        Ok(reply)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts joined
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_config_uses_configured_model() {
        let config = GeminiConfig {
            api_key: Some("literal-key".into()),
            model: "gemini-test".into(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::from_config(&config, RetryPolicy::disabled())
            .unwrap()
            .unwrap();
        assert!(client.url.ends_with("/models/gemini-test:generateContent"));

        let config = GeminiConfig {
            api_key: None,
            ..GeminiConfig::default()
        };
        assert!(
            GeminiClient::from_config(&config, RetryPolicy::disabled())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 500,
                temperature: 0.5,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "generationConfig": {"maxOutputTokens": 500, "temperature": 0.5}
            })
        );
    }

    #[test]
    fn reply_text_joins_parts_of_first_candidate() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn blocked_reply_has_no_text() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(parsed.text(), None);
    }

    #[test]
    fn url_joins_model() {
        assert_eq!(
            generate_url("https://example.test/v1beta/", "gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
