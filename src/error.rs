//! Error types for the SEO assistant

use std::io;

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for the SEO assistant
pub type Result<T> = std::result::Result<T, Error>;

/// SEO assistant errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request payload rejected before reaching the engine
    #[error("{0}")]
    InvalidInput(String),

    /// Remote NLP service answered with an error
    #[error("Upstream error from {service}: {message}")]
    Upstream {
        /// Service name (`textrazor`, `gemini`)
        service: &'static str,
        /// HTTP status returned by the service, if any
        status: Option<u16>,
        /// Error message
        message: String,
    },

    /// Remote NLP service did not answer in time
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an upstream error without a status code
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status code reported to API clients
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether a retry may succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::UpstreamTimeout(_) | Self::Io(_) => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Upstream { status, .. } => status.is_some_and(|s| s >= 500 || s == 429),
            _ => false,
        }
    }
}
