//! Command-line parsing for the choropleth renderer.
//!
//! Argument parsing and command dispatch stay separate from loading and
//! rendering code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{DEFAULT_COLORS, DEFAULT_COUNTY_URL, DEFAULT_EDUCATION_URL, UnmatchedPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "choro", version, about = "County educational attainment choropleth (SVG)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch both datasets and write the interactive SVG map.
    Render(RenderArgs),
    /// Fetch both datasets and print the color scale and join summary only.
    Summary(CommonArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Boundary topology (URL or local path).
    #[arg(long, env = "CHOROPLETH_COUNTY_URL", default_value = DEFAULT_COUNTY_URL)]
    pub county_url: String,

    /// Education records (URL or local path).
    #[arg(long, env = "CHOROPLETH_EDUCATION_URL", default_value = DEFAULT_EDUCATION_URL)]
    pub education_url: String,

    /// Comma separated swatches, lightest (highest threshold) first.
    #[arg(long, env = "CHOROPLETH_COLORS", default_value_t = DEFAULT_COLORS.join(","))]
    pub colors: String,

    /// What to do with counties that have no education record.
    #[arg(long, value_enum, default_value_t = UnmatchedPolicy::Flag)]
    pub unmatched: UnmatchedPolicy,

    /// HTTP timeout per request in seconds (default: wait indefinitely).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options for `choro render`.
#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// SVG output file (default: stdout).
    #[arg(short, long, value_name = "SVG")]
    pub out: Option<PathBuf>,

    /// Export the joined county table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Draw state outlines above the counties.
    #[arg(long)]
    pub states: bool,

    /// Do not print the run summary to stderr.
    #[arg(short, long)]
    pub quiet: bool,
}
