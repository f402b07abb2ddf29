//! Remote NLP services
//!
//! Each service sits behind a trait so the HTTP layer can run with any mix
//! of configured, missing, or stubbed backends.

mod gemini;
mod textrazor;

pub use gemini::GeminiClient;
pub use textrazor::{TextRazorClient, TextRazorResponse};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::Result;

/// Extracts SEO keywords from text
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Service name used in logs
    fn name(&self) -> &'static str;

    /// Keywords found in `text`, most relevant first
    async fn extract(&self, text: &str) -> Result<Vec<String>>;
}

/// Rewrites text so that it contains a keyword
#[async_trait]
pub trait GenerativeInserter: Send + Sync {
    /// Service name used in logs
    fn name(&self) -> &'static str;

    /// The rewritten text, as returned by the model
    async fn rewrite(&self, text: &str, keyword: &str) -> Result<String>;
}

/// HTTP client for `service` with a per-request timeout
pub(crate) fn http_client(service: &'static str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| crate::Error::Internal(format!("Failed to create {service} HTTP client: {e}")))
}

/// Map a transport failure from `service` into the crate error
pub(crate) fn transport_error(service: &'static str, e: reqwest::Error) -> crate::Error {
    if e.is_timeout() {
        crate::Error::UpstreamTimeout(service)
    } else {
        crate::Error::Http(e)
    }
}

/// Turn a non-success response into an upstream error
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(200).collect();
    Err(crate::Error::Upstream {
        service,
        status: Some(status.as_u16()),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    })
}
