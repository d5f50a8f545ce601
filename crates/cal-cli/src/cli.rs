use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "caledger",
    about = "Complex asset ledger: assemble, trace, and retire composite parts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// World-state snapshot file
    #[arg(long, global = true, default_value = "ledger-state.json")]
    pub state: PathBuf,

    /// Contract configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured containment strategy
    #[arg(long, global = true)]
    pub containment: Option<ContainmentArg>,

    /// Override the configured batch mode
    #[arg(long, global = true)]
    pub batch_mode: Option<BatchModeArg>,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ContainmentArg {
    Indexed,
    Rescan,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BatchModeArg {
    Atomic,
    Sequential,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a transaction and commit its writes
    Submit(TransactionArgs),
    /// Run a read-only transaction
    Evaluate(TransactionArgs),
    /// List the available transactions
    Transactions,
    /// Show the effective contract configuration
    Config,
}

#[derive(Args)]
pub struct TransactionArgs {
    /// Transaction name, e.g. createComplexAsset
    pub name: String,
    /// Positional transaction arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
