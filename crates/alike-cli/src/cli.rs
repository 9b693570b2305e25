use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "alike",
    about = "alike: structural comparison of JSON documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents; exits 1 when they differ
    Compare(CompareArgs),
    /// Print the effective comparison configuration as TOML
    Config(LeniencyArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// The expected document
    pub expected: PathBuf,
    /// The actual document
    pub actual: PathBuf,
    #[command(flatten)]
    pub leniency: LeniencyArgs,
    /// Maximum number of mismatches to print
    #[arg(long, default_value = "50")]
    pub limit: usize,
}

#[derive(Args, Default)]
pub struct LeniencyArgs {
    /// TOML file with a base configuration; flags are applied on top
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Ignore element order in arrays
    #[arg(long)]
    pub lenient_order: bool,
    /// Skip members whose expected value is null, zero, false, or empty
    #[arg(long)]
    pub ignore_defaults: bool,
    /// Compare dates by the configured temporal rule
    #[arg(long)]
    pub lenient_dates: bool,
    /// Assignment strategy for unordered arrays
    #[arg(long)]
    pub strategy: Option<StrategyArg>,
    /// Largest array the optimal strategy handles before falling back to greedy
    #[arg(long, default_value = "64")]
    pub max_len: usize,
    /// Member names that identify array elements when matching
    #[arg(long = "identity", value_name = "FIELD")]
    pub identity_fields: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    Greedy,
    Optimal,
}
