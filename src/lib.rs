//! # Shortsmith
//!
//! A short-form video strategy assistant backed by a generative text model.
//!
//! Shortsmith wraps user-provided channel data in fixed prompt templates,
//! sends it to Google Gemini, and turns the reply into typed values:
//!
//! - **Content ideation**: a search-grounded upload package ([`ContentPackage`])
//! - **Comment replies**: a single pinned-comment reply (plain text)
//! - **Strategic planning**: a 30-day report ([`StrategicReport`]) that feeds
//!   forward into the next ideation request
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shortsmith::llm::GeminiClient;
//! use shortsmith::{ChannelProfile, StrategyService};
//!
//! let client = Arc::new(GeminiClient::new().with_api_key("AIza..."));
//! let service = StrategyService::new(client, ChannelProfile::default());
//! let report = service.generate_strategic_plan(metrics, top, worst)?;
//! let package = service.generate_content_package(Some(&report))?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod interpreter;
pub mod llm;
pub mod models;
pub mod observability;
pub mod prompts;
pub mod services;

// Re-exports for convenience
pub use config::{ChannelProfile, StudioConfig};
pub use llm::LlmProvider;
pub use models::{ContentPackage, Outline, Shape, StrategicReport};
pub use services::{StrategyService, StudioSession};

/// Error type for shortsmith operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Blank topic, comments, or performance data |
/// | `Provider` | Network failures, non-success status, missing API key |
/// | `NoStructuredPayload` | Model reply has no `{ ... }` region |
/// | `MalformedPayload` | The `{ ... }` region is not valid JSON for the target type |
/// | `OperationFailed` | Config file, filesystem, or logging setup failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The text-generation service could not be reached or rejected the call.
    ///
    /// Raised when:
    /// - The HTTP request fails (connect, timeout, TLS)
    /// - The service answers with a non-success status
    /// - The response body cannot be read or has no candidate text
    /// - No API key is configured
    #[error("provider request '{operation}' failed: {cause}")]
    Provider {
        /// The provider operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The model reply did not contain a brace-delimited region.
    #[error("no structured payload found: the model reply did not contain a JSON object")]
    NoStructuredPayload {
        /// The full reply text.
        raw: String,
    },

    /// The brace-delimited region could not be decoded.
    #[error("malformed payload: the model reply was not valid JSON ({cause})")]
    MalformedPayload {
        /// The text that failed to decode.
        payload: String,
        /// Decoder message.
        cause: String,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns the raw model text attached to interpretation failures.
    #[must_use]
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            Self::NoStructuredPayload { raw } => Some(raw),
            Self::MalformedPayload { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Result type alias for shortsmith operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("video topic is empty".to_string());
        assert_eq!(err.to_string(), "invalid input: video topic is empty");

        let err = Error::Provider {
            operation: "gemini_request".to_string(),
            cause: "connect error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "provider request 'gemini_request' failed: connect error"
        );

        let err = Error::NoStructuredPayload {
            raw: "No data available.".to_string(),
        };
        assert!(err.to_string().starts_with("no structured payload found"));
    }

    #[test]
    fn test_offending_text() {
        let err = Error::MalformedPayload {
            payload: "{\"a\":1,}".to_string(),
            cause: "trailing comma".to_string(),
        };
        assert_eq!(err.offending_text(), Some("{\"a\":1,}"));

        let err = Error::InvalidInput("x".to_string());
        assert_eq!(err.offending_text(), None);
    }
}
