use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use shell_words::split;

use super::{write_advice, write_entries, write_summary, write_total};
use crate::application::{AppError, FinanceSession};
use crate::domain::format_cents;

const PROMPT: &str = "finai> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Add a budget entry
    Add {
        /// Category label
        category: String,

        /// Amount (e.g., "300.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List budget entries in the order they were added
    List,

    /// Show the total budget
    Total,

    /// Show one row per entry with the total
    Summary {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Investment advice for a budget
    Advice {
        /// Budget amount
        #[arg(allow_hyphen_values = true)]
        budget: String,
    },

    /// Latest intraday closing price
    Predict,

    /// Export the budget chart
    Export {
        /// Output file (.png or .pdf)
        path: PathBuf,

        /// Format: png, pdf (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export the market movement chart
    MarketChart {
        /// Output file (.png or .pdf)
        path: PathBuf,

        /// Format: png, pdf (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Leave the session
    #[command(alias = "quit")]
    Exit,
}

/// Read-eval loop over a rustyline prompt. Ends on `exit`, Ctrl-C or Ctrl-D.
pub async fn run_interactive(session: &mut FinanceSession) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!(
        "finai session for {}. Type 'help' for commands, 'exit' to leave.",
        session.symbol()
    );

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                let mut out = io::stdout();
                if handle_line(session, trimmed, &mut out).await? == LoopControl::Exit {
                    break;
                }
                out.flush()?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Run one session command. Failures of the command itself are written to
/// `out` as status text; only output errors are returned.
pub async fn handle_line(
    session: &mut FinanceSession,
    line: &str,
    out: &mut dyn Write,
) -> Result<LoopControl> {
    let words = match split(line) {
        Ok(words) => words,
        Err(err) => {
            writeln!(out, "Could not parse input: {}", err)?;
            return Ok(LoopControl::Continue);
        }
    };

    let command = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed.command,
        Err(err) => {
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    write!(out, "{}", err.render())?
                }
                _ => writeln!(out, "{}", err.render().to_string().trim_end())?,
            }
            return Ok(LoopControl::Continue);
        }
    };

    if let ShellCommand::Exit = command {
        return Ok(LoopControl::Exit);
    }

    if let Err(err) = execute(session, command, out).await? {
        tracing::debug!(error = %err, "session command failed");
        writeln!(out, "{}", err.status_text())?;
    }

    Ok(LoopControl::Continue)
}

/// Outer result: output failures. Inner result: the command's own outcome.
async fn execute(
    session: &mut FinanceSession,
    command: ShellCommand,
    out: &mut dyn Write,
) -> Result<Result<(), AppError>> {
    match command {
        ShellCommand::Add { category, amount } => match session.add_entry(&category, &amount) {
            Ok(entry) => {
                writeln!(
                    out,
                    "Added {}: {}",
                    entry.category(),
                    format_cents(entry.amount_cents())
                )?;
                write_total(out, session.total())?;
            }
            Err(err) => return Ok(Err(err)),
        },

        ShellCommand::List => write_entries(out, session.ledger().entries())?,

        ShellCommand::Total => write_total(out, session.total())?,

        ShellCommand::Summary { format } => {
            if let Err(err) = write_summary(out, &session.report(), &format) {
                writeln!(out, "{}", err)?;
            }
        }

        ShellCommand::Advice { budget } => match session.investment_advice(&budget).await {
            Ok(advice) => write_advice(out, &advice)?,
            Err(err) => return Ok(Err(err)),
        },

        ShellCommand::Predict => match session.market_prediction().await {
            Ok(prediction) => writeln!(out, "{}", prediction)?,
            Err(err) => return Ok(Err(err)),
        },

        ShellCommand::Export { path, format } => {
            match session.export_report(&path, format.as_deref()) {
                Ok(path) => writeln!(out, "Report successfully downloaded: {}", path.display())?,
                Err(err) => return Ok(Err(err)),
            }
        }

        ShellCommand::MarketChart { path, format } => {
            match session.export_market_chart(&path, format.as_deref()).await {
                Ok(path) => writeln!(out, "Report successfully downloaded: {}", path.display())?,
                Err(err) => return Ok(Err(err)),
            }
        }

        ShellCommand::Exit => {}
    }

    Ok(Ok(()))
}
