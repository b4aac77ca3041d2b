//! LLM client abstraction.
//!
//! Provides the provider trait the services talk to, the Gemini client that
//! implements it, and the request/response-schema types shared by both.

mod gemini;
mod instrumented;
mod schema;

pub use gemini::GeminiClient;
pub use instrumented::InstrumentedProvider;
pub use schema::{ResponseSchema, SchemaType};

use crate::Result;
use std::time::Duration;

/// Trait for LLM providers.
///
/// Implementations perform exactly one request per call: no retry, no backoff.
pub trait LlmProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Sends a generation request and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Provider`] if the request fails or the reply
    /// carries no text.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Generates a plain completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(&GenerationRequest::new(prompt))
    }
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Operation label used in logs and metrics.
    pub operation: &'static str,
    /// The full prompt text.
    pub prompt: String,
    /// Whether the model may consult live web search before answering.
    pub search_grounding: bool,
    /// Output shape the provider should enforce server-side.
    pub response_schema: Option<ResponseSchema>,
}

impl GenerationRequest {
    /// Creates a plain request for the given prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            operation: "complete",
            prompt: prompt.into(),
            search_grounding: false,
            response_schema: None,
        }
    }

    /// Sets the operation label.
    #[must_use]
    pub const fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = operation;
        self
    }

    /// Enables search grounding.
    #[must_use]
    pub const fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }

    /// Requests JSON output matching the schema.
    #[must_use]
    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// HTTP client configuration for LLM providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::LlmConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout_ms) = env_u64("SHORTSMITH_LLM_TIMEOUT_MS") {
            self.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = env_u64("SHORTSMITH_LLM_CONNECT_TIMEOUT_MS") {
            self.connect_timeout_ms = connect_timeout_ms;
        }
        self
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Builds a blocking HTTP client for LLM requests with configured timeouts.
///
/// A zero timeout leaves the request unbounded.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
    let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    struct EchoProvider;

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn generate(&self, request: &GenerationRequest) -> Result<String> {
            Ok(format!("{}:{}", request.operation, request.prompt))
        }
    }

    #[test]
    fn test_complete_uses_plain_request() {
        assert_eq!(EchoProvider.complete("hi").unwrap(), "complete:hi");
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("p")
            .with_operation("plan")
            .with_search_grounding()
            .with_response_schema(ResponseSchema::string());
        assert_eq!(request.operation, "plan");
        assert!(request.search_grounding);
        assert!(request.response_schema.is_some());
    }

    #[test]
    fn test_http_config_defaults_disable_timeouts() {
        let config = LlmHttpConfig::default();
        assert_eq!(config.timeout_ms, 0);
        assert_eq!(config.connect_timeout_ms, 0);
    }

    #[test]
    fn test_http_config_from_config() {
        let llm = LlmConfig {
            timeout_ms: Some(90_000),
            connect_timeout_ms: Some(2_000),
            ..Default::default()
        };
        let config = LlmHttpConfig::from_config(&llm);
        assert_eq!(config.timeout_ms, 90_000);
        assert_eq!(config.connect_timeout_ms, 2_000);
    }
}
