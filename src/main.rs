//! ParlayAdvisor - Main Entry Point
//!
//! Evaluates a parlay file, optionally enriched with a signals file, and
//! prints a leg table, a summary and commentary.

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use parlay_advisor::cli::{load_parlay_document, load_signal_document, render_report};
use parlay_advisor::config::{load_config, ReasoningMode};
use parlay_advisor::{build_commentator, ParlayEvaluator, SignalSet, Verdict};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a parlay definition JSON file
    #[arg(short, long)]
    parlay: PathBuf,

    /// Path to a JSON file with injury/matchup records and per-leg signals
    #[arg(short, long)]
    signals: Option<PathBuf>,

    /// Override the stake amount defined in the parlay file
    #[arg(long)]
    stake: Option<Decimal>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Commentary strategy (rule-based, gemini)
    #[arg(long, env = "PARLAY_REASONING_MODE")]
    reasoning: Option<ReasoningMode>,

    /// Replace the classified verdict (e.g. "high-risk")
    #[arg(long)]
    verdict_override: Option<Verdict>,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = load_config(Some(args.config.as_str())).context("failed to load configuration")?;

    // Initialize logging
    let level = config
        .settings
        .resolve_log_level(args.log_level.as_deref(), args.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Configuration file: {}", args.config);
    if let Some(mode) = args.reasoning {
        config.reasoning.mode = mode;
    }

    let parlay = load_parlay_document(&args.parlay)
        .with_context(|| format!("failed to read parlay file {}", args.parlay.display()))?
        .into_parlay(args.stake, config.settings.default_stake)
        .context("invalid parlay")?;
    info!(
        "Loaded parlay with {} legs and stake {}",
        parlay.legs().len(),
        parlay.stake()
    );

    let evaluator = ParlayEvaluator::new(config.engine.clone());
    let signals = match &args.signals {
        Some(path) => load_signal_document(path)
            .with_context(|| format!("failed to read signals file {}", path.display()))?
            .into_signal_set(&evaluator, &parlay),
        None => SignalSet::new(),
    };

    let mut evaluation = evaluator
        .evaluate(&parlay, &signals)
        .context("parlay evaluation failed")?;
    if let Some(verdict) = args.verdict_override {
        evaluation = evaluation.with_verdict_override(verdict);
    }

    println!("{}", render_report(&evaluation));

    let commentator = build_commentator(&config.reasoning)?;
    let commentary = commentator.produce_commentary(&evaluation).await?;
    println!("Analysis ({}):", commentator.name());
    println!("{}", commentary);

    Ok(())
}
