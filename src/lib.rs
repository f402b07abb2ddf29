//! SEO Assistant Library
//!
//! Text analysis and keyword insertion for SEO copy editing.
//!
//! # Features
//!
//! - **Keyword insertion**: places a keyword after the most similar existing
//!   word, falling back to the first sentence boundary and then to appending
//! - **Analysis**: keyword extraction, Flesch reading ease and sentiment
//! - **Remote services**: TextRazor extraction and Gemini rewriting, both
//!   optional and degrading to the local engine
//! - **HTTP API**: `/health`, `/analyze` and `/insert-keyword`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod failsafe;
pub mod insertion;
pub mod server;
pub mod services;
pub mod text;

pub use error::{Error, Result};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so CLI output on stdout stays clean
    match format {
        Some("json") => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| Error::Internal(format!("Failed to install tracing subscriber: {e}")))
}
