//! Binary entry point for shortsmith.
//!
//! This binary provides the CLI front end for the strategy assistant.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use shortsmith::cli::{self, OutputFormat, PlanArgs};
use shortsmith::config::StudioConfig;
use shortsmith::observability::{self, InitOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shortsmith - trend ideas, comment replies and growth plans for a Shorts channel.
#[derive(Parser)]
#[command(name = "shortsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Gemini model to use, overriding config and `SHORTSMITH_MODEL`.
    #[arg(long, global = true)]
    model: Option<String>,

    /// Channel niche, overriding the config file.
    #[arg(long, global = true)]
    niche: Option<String>,

    /// Target audience, overriding the config file.
    #[arg(long, global = true)]
    audience: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Find a trending topic and build an upload package.
    Ideas {
        /// Saved strategic report to use as context.
        #[arg(short, long)]
        insights: Option<PathBuf>,
    },

    /// Write one pinned reply to a batch of comments.
    Reply {
        /// Topic of the video the comments belong to.
        #[arg(short, long)]
        topic: String,

        /// Comment text, `@file`, or `-` for stdin.
        #[arg(short = 'm', long)]
        comments: String,
    },

    /// Analyze channel performance and produce a 30-day plan.
    Plan {
        /// Key metrics for the last 30 days (text, `@file`, or `-`).
        #[arg(long)]
        metrics: String,

        /// Top performing videos (text, `@file`, or `-`).
        #[arg(long)]
        top: String,

        /// Worst performing videos (text, `@file`, or `-`).
        #[arg(long)]
        worst: String,

        /// Save the report as JSON for later `ideas --insights` runs.
        #[arg(long)]
        save: Option<PathBuf>,

        /// Generate a content package from the new report.
        #[arg(long)]
        ideas: bool,
    },

    /// Configuration management.
    Config {
        /// Show the effective configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match StudioConfig::resolve(cli.config.as_deref()) {
        Ok(config) => apply_flags(config.with_env_overrides(), &cli),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(
        Some(&config.logging),
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Applies command-line overrides on top of file and environment settings.
fn apply_flags(mut config: StudioConfig, cli: &Cli) -> StudioConfig {
    if let Some(model) = &cli.model {
        config = config.with_model(model.as_str());
    }
    if let Some(niche) = &cli.niche {
        config.channel = config.channel.with_niche(niche.as_str());
    }
    if let Some(audience) = &cli.audience {
        config.channel = config.channel.with_audience(audience.as_str());
    }
    config
}

/// Runs the selected command.
fn run_command(cli: Cli, config: StudioConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command {
        Commands::Ideas { insights } => {
            cli::cmd_ideas(
                cli::build_service(&config),
                insights.as_deref(),
                format,
                &mut out,
            )
            .context("content ideation failed")?;
        },

        Commands::Reply { topic, comments } => {
            let comments = cli::read_text_arg(&comments).context("reading comments")?;
            cli::cmd_reply(
                &cli::build_service(&config),
                &topic,
                &comments,
                format,
                &mut out,
            )
            .context("comment reply failed")?;
        },

        Commands::Plan {
            metrics,
            top,
            worst,
            save,
            ideas,
        } => {
            let args = PlanArgs {
                key_metrics: cli::read_text_arg(&metrics).context("reading --metrics")?,
                top_videos: cli::read_text_arg(&top).context("reading --top")?,
                worst_videos: cli::read_text_arg(&worst).context("reading --worst")?,
                save,
                then_ideas: ideas,
            };
            cli::cmd_plan(cli::build_service(&config), &args, format, &mut out)
                .context("strategic planning failed")?;
        },

        Commands::Config { show } => {
            if show {
                cli::cmd_config_show(&config, format, &mut out)?;
            } else {
                writeln!(out, "Use --show to display the effective configuration")?;
            }
        },
    }

    out.flush()?;
    Ok(())
}
