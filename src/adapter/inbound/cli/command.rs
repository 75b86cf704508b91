//! Command-line interface definitions.
//!
//! Defines the CLI structure for gridrank using `clap`: business registry
//! management, grid analysis runs, snapshot history, grid previews and
//! configuration checks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Geographic grid rank tracking for local search
#[derive(Parser, Debug)]
#[command(name = "gridrank")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.gridrank/config.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the gridrank CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tracked businesses
    #[command(subcommand)]
    Business(BusinessCommand),

    /// Run a grid analysis for a business (Ctrl-C stops early and keeps partial results)
    Analyze(AnalyzeArgs),

    /// Show past grid analyses for a business, newest first
    History(HistoryArgs),

    /// Inspect grid geometry
    #[command(subcommand)]
    Grid(GridCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `gridrank business`.
#[derive(Subcommand, Debug)]
pub enum BusinessCommand {
    /// Register a business.
    Add(BusinessAddArgs),
    /// List registered businesses, oldest first.
    List(TenantArg),
    /// Remove a business and its analysis history.
    Remove(BusinessRemoveArgs),
}

/// Subcommands for `gridrank grid`.
#[derive(Subcommand, Debug)]
pub enum GridCommand {
    /// Print the coordinates a run would sample.
    Preview(GridPreviewArgs),
}

/// Subcommands for `gridrank config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented config template.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Optional tenant scope.
#[derive(Args, Debug)]
pub struct TenantArg {
    /// Restrict to businesses owned by this tenant.
    #[arg(long)]
    pub tenant: Option<String>,
}

/// Arguments for `business add`.
#[derive(Args, Debug)]
pub struct BusinessAddArgs {
    /// Owning tenant.
    #[arg(long)]
    pub tenant: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Maps provider place id.
    #[arg(long)]
    pub place_id: Option<String>,
}

/// Arguments for `business remove`.
#[derive(Args, Debug)]
pub struct BusinessRemoveArgs {
    /// Business id.
    pub business_id: String,

    /// Only remove if owned by this tenant.
    #[arg(long)]
    pub tenant: Option<String>,
}

/// Arguments for `analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Business id.
    pub business_id: String,

    /// Search keyword issued at every grid point.
    #[arg(short, long)]
    pub keyword: String,

    /// Distance from the center to the grid edge, in kilometers (0-10 exclusive).
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Points per grid side (3-9).
    #[arg(long)]
    pub grid_size: Option<u32>,

    /// Require the business to belong to this tenant.
    #[arg(long)]
    pub tenant: Option<String>,
}

/// Arguments for `history`.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Business id.
    pub business_id: String,

    /// Require the business to belong to this tenant.
    #[arg(long)]
    pub tenant: Option<String>,

    /// Render each snapshot's rank grid.
    #[arg(long)]
    pub points: bool,

    /// Show at most this many snapshots.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `grid preview`.
#[derive(Args, Debug)]
pub struct GridPreviewArgs {
    /// Center latitude.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Center longitude.
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Distance from the center to the grid edge, in kilometers.
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Points per grid side.
    #[arg(long)]
    pub grid_size: Option<u32>,
}
