//! Configuration management

use std::{env, path::Path, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::insertion::{CachePolicy, InsertionMode};
use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Environment files to load before resolving API keys.
    /// Paths support ~ expansion. Loaded in order; variables already set in
    /// the process environment win.
    pub env_files: Vec<String>,
    /// Server configuration
    pub server: ServerConfig,
    /// Keyword insertion engine
    pub insertion: InsertionConfig,
    /// TextRazor keyword extraction
    pub textrazor: TextRazorConfig,
    /// Gemini generative insertion
    pub gemini: GeminiConfig,
    /// Retry policy shared by remote services
    pub retry: RetryConfig,
}

impl Config {
    /// Load configuration from defaults, an optional YAML file and the
    /// `SEO_ASSISTANT_` environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // SEO_ASSISTANT_SERVER__PORT=8080 -> server.port
        figment = figment.merge(Env::prefixed("SEO_ASSISTANT_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        config.load_env_files();

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(Error::Config("retry.max_attempts must be at least 1".into()));
        }
        if self.retry.multiplier < 1.0 {
            return Err(Error::Config("retry.multiplier must be >= 1.0".into()));
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(Error::Config(
                "gemini.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        Ok(())
    }

    /// Load environment files into the process environment.
    /// Supports ~ expansion. Files that don't exist are silently skipped.
    fn load_env_files(&self) {
        for path_str in &self.env_files {
            let expanded = expand_home(path_str);
            let path = Path::new(&expanded);
            if !path.exists() {
                tracing::debug!("Env file not found (skipped): {expanded}");
                continue;
            }
            match dotenvy::from_path(path) {
                Ok(()) => tracing::info!("Loaded env file: {expanded}"),
                Err(e) => tracing::warn!("Failed to load env file {expanded}: {e}"),
            }
        }
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => format!("{}{rest}", home.display()),
        _ => path.to_string(),
    }
}

/// Resolve an API key setting: `env:VAR` reads the variable, anything else
/// is the key itself. Empty values count as unset.
#[must_use]
pub fn resolve_api_key(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    let resolved = match value.strip_prefix("env:") {
        Some(var_name) => env::var(var_name).ok()?,
        None => value.to_string(),
    };
    (!resolved.trim().is_empty()).then_some(resolved)
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(60),
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Insertion engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertionConfig {
    /// Similarity cache
    pub cache: SimilarityCacheConfig,
    /// Mode used when a request does not name one
    pub default_mode: InsertionMode,
}

/// Similarity cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityCacheConfig {
    /// Eviction policy
    pub policy: CachePolicy,
    /// Maximum entries for the `lru` policy
    pub capacity: usize,
}

impl Default for SimilarityCacheConfig {
    fn default() -> Self {
        Self {
            policy: CachePolicy::Lru,
            capacity: 10_000,
        }
    }
}

/// TextRazor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRazorConfig {
    /// API key (supports `env:VAR_NAME`)
    pub api_key: Option<String>,
    /// Analysis endpoint
    pub endpoint: String,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for TextRazorConfig {
    fn default() -> Self {
        Self {
            api_key: Some("env:TEXTRAZOR_API_KEY".to_string()),
            endpoint: "https://api.textrazor.com".to_string(),
            timeout: Duration::from_secs(6),
        }
    }
}

impl TextRazorConfig {
    /// The resolved API key, if one is configured
    #[must_use]
    pub fn resolve_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref())
    }
}

/// Gemini configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key (supports `env:VAR_NAME`)
    pub api_key: Option<String>,
    /// API base URL
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Output token cap
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: Some("env:GEMINI_API_KEY".to_string()),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout: Duration::from_secs(30),
            max_output_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl GeminiConfig {
    /// The resolved API key, if one is configured
    #[must_use]
    pub fn resolve_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref())
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries
    pub enabled: bool,
    /// Maximum attempts, including the first
    pub max_attempts: u32,
    /// Initial backoff duration
    #[serde(with = "humantime_serde")]
    pub initial_backoff: Duration,
    /// Maximum backoff duration
    #[serde(with = "humantime_serde")]
    pub max_backoff: Duration,
    /// Backoff multiplier
    pub multiplier: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

/// Custom humantime serde module for Duration
pub mod humantime_serde {
    use std::time::Duration;

    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Serialize Duration to human-readable string (e.g., "30s", "250ms")
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the serializer fails.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    /// Deserialize human-readable duration string (e.g., "30s", "5m", "100ms")
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the string cannot be parsed as a duration.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();

        // "ms" before "s" and "m"
        if let Some(ms) = s.strip_suffix("ms") {
            ms.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(serde::de::Error::custom)
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(serde::de::Error::custom)
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(serde::de::Error::custom)
        } else {
            // Assume seconds
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(serde::de::Error::custom)
        }
    }
}
