// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use billviz_transforms::{BucketZone, GroupBy};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Spend-over-time charts from billing event payloads")]
pub(crate) struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Aggregate events into hourly spend series
    Chart(ChartArgs),
    /// List priced events, newest first
    Ledger(LedgerArgs),
    /// Generate dummy events over the active SKUs
    Generate(GenerateArgs),
}

/// Collaborator payloads.
#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// JSON array of events
    #[arg(short, long)]
    pub(crate) events: PathBuf,

    /// JSON array of SKUs
    #[arg(short, long)]
    pub(crate) skus: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ChartArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Series dimension
    #[arg(short, long, value_enum)]
    pub(crate) group_by: Option<GroupArg>,

    /// Dedicated series before folding the rest into "Others"
    #[arg(short = 'n', long)]
    pub(crate) max_series: Option<usize>,

    /// Bucketing zone: `local`, `utc` or an offset like `+05:30`
    #[arg(short, long, allow_hyphen_values = true)]
    pub(crate) zone: Option<BucketZone>,

    /// `chrono` format string for row labels
    #[arg(long)]
    pub(crate) label_format: Option<String>,

    /// Hide a series (repeatable)
    #[arg(long = "hide", value_name = "KEY")]
    pub(crate) hide: Vec<String>,

    /// Show only this series
    #[arg(long, value_name = "KEY")]
    pub(crate) solo: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LedgerArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Zone used to display send times
    #[arg(short, long, allow_hyphen_values = true)]
    pub(crate) zone: Option<BucketZone>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// JSON array of SKUs to draw from
    #[arg(short, long)]
    pub(crate) skus: PathBuf,

    /// Number of events
    #[arg(short = 'n', long, default_value_t = 20)]
    pub(crate) count: usize,

    /// Merchant id stamped on every event
    #[arg(short, long, default_value = "demo")]
    pub(crate) merchant: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum GroupArg {
    Customer,
    Sku,
}

impl From<GroupArg> for GroupBy {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Customer => Self::Customer,
            GroupArg::Sku => Self::Sku,
        }
    }
}
