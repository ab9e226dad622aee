mod output;
pub mod shell;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use crate::application::FinanceSession;
use crate::config::{DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_SYMBOL, MarketConfig};
use crate::domain::Interval;

pub use output::*;

/// finai - budget ledger, market quotes and chart reports
#[derive(Parser)]
#[command(name = "finai")]
#[command(about = "Record a session budget, check market quotes and export budget charts")]
#[command(version)]
pub struct Cli {
    /// Alpha Vantage API key
    #[arg(long, env = "FINAI_API_KEY", hide_env_values = true, global = true)]
    #[arg(default_value = DEFAULT_API_KEY)]
    pub api_key: String,

    /// Ticker symbol used for advice and predictions
    #[arg(long, env = "FINAI_SYMBOL", default_value = DEFAULT_SYMBOL, global = true)]
    pub symbol: String,

    /// Market data endpoint
    #[arg(long, env = "FINAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Intraday interval: 1min, 5min, 15min, 30min, 60min
    #[arg(long, env = "FINAI_INTERVAL", default_value = "1min", global = true)]
    pub interval: String,

    /// Request timeout in seconds
    #[arg(long, env = "FINAI_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Investment advice for a budget, based on the latest daily close
    Advice {
        /// Budget amount (e.g., "1000" or "1000.00")
        #[arg(allow_hyphen_values = true)]
        budget: String,
    },

    /// Latest intraday closing price
    Predict,

    /// Summarize budget entries and optionally export the chart
    Report {
        /// Budget entry as CATEGORY=AMOUNT (repeatable)
        #[arg(short, long = "entry", required = true)]
        entries: Vec<String>,

        /// Chart output file (.png or .pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Chart format: png, pdf (defaults to the output extension)
        #[arg(short, long)]
        format: Option<String>,

        /// Summary format: table, json, csv
        #[arg(long, default_value = "table")]
        summary: String,
    },

    /// Export the intraday market movement chart
    MarketChart {
        /// Chart output file (.png or .pdf)
        #[arg(short, long)]
        output: PathBuf,

        /// Chart format: png, pdf (defaults to the output extension)
        #[arg(short, long)]
        format: Option<String>,
    },
}

impl Cli {
    pub fn market_config(&self) -> Result<MarketConfig> {
        let interval = Interval::from_str(&self.interval).ok_or_else(|| {
            anyhow!(
                "Invalid interval '{}'. Use 1min, 5min, 15min, 30min or 60min",
                self.interval
            )
        })?;

        Ok(MarketConfig::default()
            .with_api_key(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_symbol(&self.symbol)
            .with_interval(interval)
            .with_timeout(Duration::from_secs(self.timeout_secs.max(1))))
    }

    pub async fn run(self) -> Result<()> {
        let config = self.market_config()?;
        tracing::debug!(?config, "configuration loaded");
        let mut session =
            FinanceSession::new(config).context("Failed to set up the market data client")?;

        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => {
                drop(out);
                shell::run_interactive(&mut session).await?;
            }

            Commands::Advice { budget } => {
                let advice = session.investment_advice(&budget).await?;
                write_advice(&mut out, &advice)?;
            }

            Commands::Predict => {
                let prediction = session.market_prediction().await?;
                writeln!(out, "{}", prediction)?;
            }

            Commands::Report {
                entries,
                output,
                format,
                summary,
            } => {
                for raw in &entries {
                    let (category, amount) = parse_entry_arg(raw)?;
                    session
                        .add_entry(category, amount)
                        .with_context(|| format!("Invalid entry '{}'", raw))?;
                }

                write_summary(&mut out, &session.report(), &summary)?;

                if let Some(target) = output {
                    let path = session
                        .export_report(&target, format.as_deref())
                        .with_context(|| format!("Failed to export {}", target.display()))?;
                    writeln!(out, "Report successfully downloaded: {}", path.display())?;
                }
            }

            Commands::MarketChart { output, format } => {
                let path = session
                    .export_market_chart(&output, format.as_deref())
                    .await
                    .with_context(|| format!("Failed to export {}", output.display()))?;
                writeln!(out, "Report successfully downloaded: {}", path.display())?;
            }
        }

        Ok(())
    }
}

/// Split `CATEGORY=AMOUNT` at the last `=`, so categories may contain one.
pub fn parse_entry_arg(raw: &str) -> Result<(&str, &str)> {
    raw.rsplit_once('=')
        .ok_or_else(|| anyhow!("Invalid entry '{raw}'. Use CATEGORY=AMOUNT, e.g. Rent=1200"))
}
