use anyhow::Context;
use cal_contract::{AssetContract, BatchMode, ContainmentStrategy, ContractConfig};
use cal_gateway::{names, Gateway, TransactionEvaluator, TransactionSubmitter};
use cal_store::InMemoryStateStore;
use colored::Colorize;
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Submit(args) => cmd_submit(&cli, args),
        Command::Evaluate(args) => cmd_evaluate(&cli, args),
        Command::Transactions => cmd_transactions(),
        Command::Config => cmd_config(&cli),
    }
}

/// Configuration file (if any) with command-line overrides applied.
pub fn load_config(cli: &Cli) -> anyhow::Result<ContractConfig> {
    let mut config = match &cli.config {
        Some(path) => ContractConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ContractConfig::default(),
    };
    if let Some(containment) = cli.containment {
        config = config.with_containment(match containment {
            ContainmentArg::Indexed => ContainmentStrategy::Indexed,
            ContainmentArg::Rescan => ContainmentStrategy::Rescan,
        });
    }
    if let Some(mode) = cli.batch_mode {
        config = config.with_batch_mode(match mode {
            BatchModeArg::Atomic => BatchMode::Atomic,
            BatchModeArg::Sequential => BatchMode::Sequential,
        });
    }
    Ok(config)
}

fn open_gateway(cli: &Cli) -> anyhow::Result<Gateway<InMemoryStateStore>> {
    let config = load_config(cli)?;
    let store = InMemoryStateStore::open_snapshot(&cli.state)
        .with_context(|| format!("opening state {}", cli.state.display()))?;
    Ok(Gateway::new(store, AssetContract::new(config)))
}

fn cmd_submit(cli: &Cli, args: &TransactionArgs) -> anyhow::Result<()> {
    let gateway = open_gateway(cli)?;
    let argv: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let out = gateway.submit_transaction(&args.name, &argv)?;
    gateway
        .store()
        .save_snapshot(&cli.state)
        .with_context(|| format!("saving state {}", cli.state.display()))?;
    info!(
        transaction = %args.name,
        state = %cli.state.display(),
        keys = gateway.store().len()?,
        "transaction committed"
    );
    print_result(&cli.format, &args.name, &out, true)
}

fn cmd_evaluate(cli: &Cli, args: &TransactionArgs) -> anyhow::Result<()> {
    let gateway = open_gateway(cli)?;
    let argv: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let out = gateway.evaluate_transaction(&args.name, &argv)?;
    print_result(&cli.format, &args.name, &out, false)
}

fn print_result(
    format: &OutputFormat,
    name: &str,
    out: &[u8],
    committed: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            if !out.is_empty() {
                println!("{}", String::from_utf8_lossy(out));
            }
        }
        OutputFormat::Text => {
            if out.is_empty() {
                if committed {
                    println!("{} {} committed", "✓".green().bold(), name.cyan());
                }
            } else {
                let value: serde_json::Value =
                    serde_json::from_slice(out).context("decoding transaction result")?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }
    }
    Ok(())
}

fn cmd_transactions() -> anyhow::Result<()> {
    println!("{}", "evaluate / submit:".bold());
    for name in names::EVALUATE {
        println!("  {}", name.green());
    }
    println!("{}", "submit only:".bold());
    for name in names::SUBMIT {
        println!("  {}", name.yellow());
    }
    Ok(())
}

fn cmd_config(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
