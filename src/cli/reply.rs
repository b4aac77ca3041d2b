//! `reply` command.

use super::{OutputFormat, to_pretty_json, write_error};
use crate::Result;
use crate::services::StrategyService;
use std::io::Write;

/// Generates a pinned reply to a batch of comments.
///
/// # Errors
///
/// Returns an error if either input is blank, generation fails, or the output
/// cannot be written.
pub fn cmd_reply<W: Write>(
    service: &StrategyService,
    topic: &str,
    comments: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let reply = service.generate_comment_reply(topic, comments)?;
    let rendered = match format {
        OutputFormat::Text => reply,
        OutputFormat::Json => to_pretty_json(&serde_json::json!({
            "topic": topic,
            "reply": reply,
        }))?,
    };
    writeln!(out, "{}", rendered.trim_end()).map_err(write_error)
}
