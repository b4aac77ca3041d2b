//! `plan` command.

use super::{
    OutputFormat, render_content_package, render_strategic_report, save_report, to_pretty_json,
    write_error,
};
use crate::Result;
use crate::services::{StrategyService, StudioSession};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default)]
pub struct PlanArgs {
    /// Key channel metrics for the last 30 days.
    pub key_metrics: String,
    /// Top performing videos.
    pub top_videos: String,
    /// Worst performing videos.
    pub worst_videos: String,
    /// Where to save the report for later `ideas --insights` runs.
    pub save: Option<PathBuf>,
    /// Generate a content package from the new report in the same run.
    pub then_ideas: bool,
}

/// Generates a strategic plan, optionally followed by informed ideation.
///
/// A failed ideation call still leaves the plan on the output: text mode
/// prints the report before ideation starts, and JSON mode emits
/// `{"report": .., "error": ..}` in place of the package.
///
/// # Errors
///
/// Returns an error if any block is blank, generation fails, or the output
/// cannot be written.
pub fn cmd_plan<W: Write>(
    service: StrategyService,
    args: &PlanArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let mut session = StudioSession::new(service);
    let report = session
        .plan(&args.key_metrics, &args.top_videos, &args.worst_videos)?
        .clone();

    if let Some(path) = &args.save {
        save_report(path, &report)?;
    }

    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", render_strategic_report(&report).trim_end()).map_err(write_error)?;
            if args.then_ideas {
                let package = session.generate_content()?;
                writeln!(out).map_err(write_error)?;
                writeln!(out, "{}", render_content_package(package).trim_end())
                    .map_err(write_error)?;
            }
        },
        OutputFormat::Json => {
            let (value, failure) = if args.then_ideas {
                match session.generate_content() {
                    Ok(package) => (
                        serde_json::json!({ "report": report, "package": package }),
                        None,
                    ),
                    Err(err) => (
                        serde_json::json!({ "report": report, "error": err.to_string() }),
                        Some(err),
                    ),
                }
            } else {
                (serde_json::json!({ "report": report }), None)
            };
            writeln!(out, "{}", to_pretty_json(&value)?).map_err(write_error)?;
            if let Some(err) = failure {
                return Err(err);
            }
        },
    }

    Ok(())
}
