//! Generative text-extraction service abstraction.
//!
//! The extractors fall back to a small generative model when structural
//! pattern matching misses. This module provides the [`TextGenerator`]
//! capability they are constructed with, and the HTTP client plumbing the
//! shipped Ollama implementation uses.

mod ollama;

pub use ollama::OllamaGenerator;

use crate::Result;
use std::time::Duration;

/// Trait for generative extraction services.
///
/// Implementations are expected to decode greedily (no sampling) so that
/// repeated calls on identical input are reproducible; the engine's output
/// must be auditable.
pub trait TextGenerator: Send + Sync {
    /// The provider name, for logging.
    fn name(&self) -> &'static str;

    /// Generates a bounded-length completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails; callers degrade such
    /// failures to "none found" rather than propagating them.
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

/// HTTP client configuration for generative providers.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

/// Builds a blocking HTTP client with the given timeouts.
#[must_use]
pub(crate) fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("failed to build generative HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = LlmHttpConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.connect_timeout_ms, 3_000);
    }
}
