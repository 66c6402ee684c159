//! Waterfall Engine CLI
//!
//! Runs a distribution waterfall for one commitment from a transactions CSV

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use waterfall_engine::ledger::{load_ledger, loader::DEFAULT_TRANSACTIONS_PATH};
use waterfall_engine::{WaterfallConfig, WaterfallEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Labelled summary
    Text,
    /// Pretty-printed result record
    Json,
    /// Header plus one report row
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "waterfall", version, about = "Private equity distribution waterfall analysis")]
struct Args {
    /// Transactions CSV (commitment_id, transaction_date, transaction_amount, contribution_or_distribution)
    #[arg(short, long, default_value = DEFAULT_TRANSACTIONS_PATH)]
    transactions: PathBuf,

    /// Commitment to analyse
    #[arg(short, long)]
    commitment: u32,

    /// Analysis date (YYYY-MM-DD); only transactions strictly before it count
    #[arg(short, long, value_parser = parse_analysis_date)]
    date: NaiveDate,

    /// JSON file with waterfall rates; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Annual preferred return (hurdle) rate
    #[arg(long)]
    pref_rate: Option<f64>,

    /// GP carried interest rate
    #[arg(long)]
    carry_rate: Option<f64>,

    /// Catch-up rate
    #[arg(long)]
    catch_up_rate: Option<f64>,

    /// LP split rate (reported only)
    #[arg(long)]
    lp_split_rate: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_analysis_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{} (expected YYYY-MM-DD)", e))
}

impl Args {
    fn waterfall_config(&self) -> Result<WaterfallConfig> {
        let mut config = match &self.config {
            Some(path) => WaterfallConfig::from_json_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => WaterfallConfig::default(),
        };

        if let Some(rate) = self.pref_rate {
            config.preferred_return_rate = rate;
        }
        if let Some(rate) = self.carry_rate {
            config.carried_interest_rate = rate;
        }
        if let Some(rate) = self.catch_up_rate {
            config.catch_up_rate = rate;
        }
        if let Some(rate) = self.lp_split_rate {
            config.lp_split_rate = rate;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.waterfall_config()?;
    log::debug!("Waterfall config: {:?}", config);

    let ledger = load_ledger(&args.transactions)
        .with_context(|| format!("Failed to load transactions from {}", args.transactions.display()))?;

    let engine = WaterfallEngine::new(ledger, config)?;
    let report = engine
        .generate_report(args.commitment, args.date)
        .with_context(|| format!("Waterfall analysis failed for commitment {}", args.commitment))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Text => writeln!(out, "{}", report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report.result())?;
            writeln!(out)?;
        }
        OutputFormat::Csv => report.write_csv(&mut out)?,
    }

    if let Some(path) = &args.output {
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}
