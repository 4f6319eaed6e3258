//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the log subscriber
//! - runs the load/prepare pipeline
//! - writes the SVG, the optional CSV and the summary

use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CommonArgs, RenderArgs};
use crate::domain::{Palette, RenderConfig, Source};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `choro` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => {
            init_logging(args.common.verbose);
            handle_render(args)
        }
        Command::Summary(args) => {
            init_logging(args.verbose);
            handle_summary(args)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let config = render_config_from_args(&args);
    let data = pipeline::load(&config)?;
    let prepared = pipeline::prepare(&config, &data)?;

    let document = prepared.render(&config);
    crate::io::write_document(config.output.as_deref(), &document)?;
    if let Some(path) = &config.output {
        info!(path = %path.display(), bytes = document.len(), "SVG written");
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_joined_csv(path, &prepared.joined, &prepared.scale)?;
        info!(path = %path.display(), "CSV written");
    }

    if !args.quiet {
        eprintln!(
            "{}",
            crate::report::format_run_summary(&config, data.education.len(), &prepared.joined, &prepared.scale)
        );
    }

    Ok(())
}

fn handle_summary(args: CommonArgs) -> Result<(), AppError> {
    let config = config_from_common(&args);
    let data = pipeline::load(&config)?;
    let prepared = pipeline::prepare(&config, &data)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, data.education.len(), &prepared.joined, &prepared.scale)
    );
    Ok(())
}

pub fn render_config_from_args(args: &RenderArgs) -> RenderConfig {
    RenderConfig {
        state_outlines: args.states,
        output: args.out.clone(),
        export_csv: args.export.clone(),
        ..config_from_common(&args.common)
    }
}

pub fn config_from_common(args: &CommonArgs) -> RenderConfig {
    RenderConfig {
        county_source: Source::parse(&args.county_url),
        education_source: Source::parse(&args.education_url),
        palette: Palette::parse(&args.colors),
        unmatched: args.unmatched,
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..RenderConfig::default()
    }
}

/// Rewrite argv so `choro` defaults to `choro render`.
///
/// Rules:
/// - `choro`                      -> `choro render`
/// - `choro --out map.svg ...`    -> `choro render --out map.svg ...`
/// - `choro --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("render".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "summary");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "render".to_string());
        return argv;
    }

    argv
}
