//! Debtplan CLI
//!
//! Runs avalanche/snowball payoff simulations over JSON plan documents.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{SimulateOverrides, overview_document, simulate_document};
use debtplan_core::payoff::PayoffCache;
use debtplan_shared::{AppConfig, AppError};

#[derive(Debug, Parser)]
#[command(name = "debtplan", version, about = "Debt payoff planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a month-by-month payoff schedule.
    Simulate(SimulateArgs),
    /// Summarize liability accounts and list both payoff orders.
    Overview(OverviewArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Plan document(s); identical plans are computed once.
    #[arg(long, short, required = true)]
    input: Vec<PathBuf>,
    /// Monthly budget, overriding the document.
    #[arg(long)]
    budget: Option<Decimal>,
    /// AVALANCHE or SNOWBALL; anything else falls back to AVALANCHE.
    #[arg(long)]
    strategy: Option<String>,
    /// Month cap, overriding the document and configuration.
    #[arg(long)]
    max_months: Option<u32>,
}

#[derive(Debug, Args)]
struct OverviewArgs {
    /// JSON list of liability accounts.
    #[arg(long, short)]
    input: PathBuf,
    /// Monthly budget for the naive months estimate.
    #[arg(long)]
    budget: Option<Decimal>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(args) => {
            let cache = PayoffCache::from_config(&config.cache);
            let overrides = SimulateOverrides {
                budget: args.budget,
                strategy: args.strategy,
                max_months: args.max_months,
            };

            let mut reports = Vec::with_capacity(args.input.len());
            for path in &args.input {
                let json = read_document(path)?;
                let report = simulate_document(&json, &overrides, &config.planner, &cache)
                    .with_context(|| format!("Failed to simulate {}", path.display()))?;
                reports.push(report);
            }
            info!(plans = reports.len(), "simulation finished");

            if let [report] = reports.as_slice() {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        Command::Overview(args) => {
            let json = read_document(&args.input)?;
            let report = overview_document(&json, args.budget)
                .with_context(|| format!("Failed to read accounts from {}", args.input.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::InvalidDocument(format!("{}: {e}", path.display())))
}
