use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Minimum-cost transportation planner", long_about = None)]
pub struct Cli {
    /// Set the logging level (defaults to the config file, then `warn`)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file (defaults to ~/.tpt/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a transportation problem
    Solve {
        #[command(flatten)]
        instance: InstanceArgs,
        /// Backend id (see `backends`)
        #[arg(long)]
        backend: Option<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Decimal places in the report (0 to 15)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=crate::render::MAX_PRECISION as i64))]
        precision: Option<u32>,
        /// Write the report to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Show the balanced instance (fictitious supplier, shortage)
    Balance {
        #[command(flatten)]
        instance: InstanceArgs,
    },
    /// List solver backends
    Backends,
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Where the problem comes from: a file, or inline numbers.
#[derive(Args, Debug, Clone, Default)]
pub struct InstanceArgs {
    /// Instance file (.json or .toml) with `supply`, `demand` and `cost`
    #[arg(value_hint = ValueHint::FilePath)]
    pub instance: Option<PathBuf>,
    /// Supplier capacities, comma separated (e.g. `20,30`)
    #[arg(long, allow_hyphen_values = true)]
    pub supply: Option<String>,
    /// Consumer requirements, comma separated (e.g. `25,25`)
    #[arg(long, allow_hyphen_values = true)]
    pub demand: Option<String>,
    /// Cost matrix, rows separated by `;` (e.g. `8,6;9,5`)
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
