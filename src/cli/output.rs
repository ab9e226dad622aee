use std::io::Write;

use anyhow::{Result, bail};

use crate::application::BudgetReport;
use crate::domain::{BudgetEntry, Cents, InvestmentAdvice, format_cents};

pub fn write_total(out: &mut dyn Write, total: Cents) -> Result<()> {
    writeln!(out, "Total Budget: ${}", format_cents(total))?;
    Ok(())
}

pub fn write_advice(out: &mut dyn Write, advice: &InvestmentAdvice) -> Result<()> {
    writeln!(out, "{}", advice)?;
    writeln!(
        out,
        "Suggested allocation: ${} of ${}",
        format_cents(advice.allocation_cents),
        format_cents(advice.budget_cents)
    )?;
    Ok(())
}

pub fn write_entries(out: &mut dyn Write, entries: &[BudgetEntry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No budget entries yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<24} {:>12} {:<19}",
        "#", "CATEGORY", "AMOUNT", "ADDED"
    )?;
    writeln!(out, "{}", "-".repeat(62))?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<24} {:>12} {:<19}",
            i + 1,
            entry.category(),
            format_cents(entry.amount_cents()),
            entry.recorded_at().format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}

/// Print the report as `table`, `json` or `csv`.
pub fn write_summary(out: &mut dyn Write, report: &BudgetReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
        "csv" => {
            write!(out, "{}", report.to_csv())?;
        }
        "table" => {
            writeln!(out, "Budget Summary")?;
            writeln!(out)?;
            writeln!(out, "{:<24} {:>12}", "CATEGORY", "AMOUNT")?;
            writeln!(out, "{}", "-".repeat(37))?;
            for row in &report.rows {
                let amount = format_cents(row.amount_cents);
                writeln!(out, "{:<24} {:>12}", row.category, amount)?;
            }
            writeln!(out, "{}", "-".repeat(37))?;
            writeln!(out, "{:<24} {:>12}", "TOTAL", format_cents(report.total))?;
        }
        other => bail!("Unknown summary format '{other}'. Use table, json or csv"),
    }
    Ok(())
}
