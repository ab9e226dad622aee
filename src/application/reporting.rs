use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetLedger, Cents, SummaryRow, format_cents};

/// Snapshot of the ledger as rendered in tables, JSON output and charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SummaryRow>,
    pub total: Cents,
}

impl BudgetReport {
    pub fn from_ledger(ledger: &BudgetLedger) -> Self {
        Self {
            generated_at: Utc::now(),
            rows: ledger.summary(),
            total: ledger.total(),
        }
    }

    /// `category,amount` lines with a header, amounts as decimals.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("category,amount\n");
        for row in &self.rows {
            let amount = format_cents(row.amount_cents);
            out.push_str(&format!("{},{}\n", csv_field(&row.category), amount));
        }
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_ledger() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("Rent", "1200.00").unwrap();
        ledger.add_entry("Food, drinks", "300.50").unwrap();

        let report = BudgetReport::from_ledger(&ledger);
        assert_eq!(report.total, 150050);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.to_csv(),
            "category,amount\nRent,1200.00\n\"Food, drinks\",300.50\n"
        );
    }
}
