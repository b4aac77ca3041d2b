//! `ideas` command.

use super::{OutputFormat, load_report, render_content_package, to_pretty_json, write_error};
use crate::Result;
use crate::services::{StrategyService, StudioSession};
use std::io::Write;
use std::path::Path;

/// Generates a content package, optionally informed by a saved report.
///
/// # Errors
///
/// Returns an error if the report cannot be loaded, generation fails, or the
/// output cannot be written.
pub fn cmd_ideas<W: Write>(
    service: StrategyService,
    insights: Option<&Path>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let mut session = StudioSession::new(service);
    if let Some(path) = insights {
        session = session.with_insights(load_report(path)?);
        tracing::info!(path = %path.display(), "Using saved strategic report as context");
    }

    let package = session.generate_content()?;
    let rendered = match format {
        OutputFormat::Text => render_content_package(package),
        OutputFormat::Json => to_pretty_json(package)?,
    };
    writeln!(out, "{}", rendered.trim_end()).map_err(write_error)
}
