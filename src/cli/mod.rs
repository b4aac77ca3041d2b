//! CLI command implementations.
//!
//! The command line is the presentation layer: each command takes a
//! validated value or an error from the services and renders it.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ideas` | Find a trending topic and build an upload package |
//! | `reply` | Write one pinned reply to a batch of comments |
//! | `plan` | Analyze channel performance and produce a 30-day plan |
//! | `config` | Show the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Plan from files, then generate ideas informed by the plan
//! shortsmith plan --metrics @metrics.txt --top @top.txt --worst @worst.txt --ideas
//!
//! # Reply to comments piped on stdin
//! pbpaste | shortsmith reply --topic "The Great Emu War" --comments -
//! ```

mod config;
mod ideas;
mod input;
mod plan;
mod reply;
mod render;

pub use config::cmd_config_show;
pub use ideas::cmd_ideas;
pub use input::{load_report, read_text_arg, save_report};
pub use plan::{PlanArgs, cmd_plan};
pub use reply::cmd_reply;
pub use render::{render_content_package, render_strategic_report};

use crate::config::StudioConfig;
use crate::llm::{GeminiClient, InstrumentedProvider, LlmProvider};
use crate::services::StrategyService;
use crate::Error;
use std::io;
use std::sync::Arc;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Builds the instrumented Gemini provider from configuration.
#[must_use]
pub fn build_provider(config: &StudioConfig) -> Arc<dyn LlmProvider> {
    Arc::new(InstrumentedProvider::new(GeminiClient::from_config(
        &config.llm,
    )))
}

/// Builds the strategy service from configuration.
#[must_use]
pub fn build_service(config: &StudioConfig) -> StrategyService {
    StrategyService::new(build_provider(config), config.channel.clone())
}

/// Converts an output write failure.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn write_error(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}

/// Serializes a value as pretty JSON.
pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> crate::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_output".to_string(),
        cause: e.to_string(),
    })
}
