use serde::{Deserialize, Serialize};

use super::{BudgetEntry, Cents, ValidationError};

/// One chart row: a category label and its amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub category: String,
    pub amount_cents: Cents,
}

/// In-memory, insertion-ordered collection of budget entries for one session.
///
/// Totals and summaries are derived on every call, never cached.
#[derive(Debug, Clone, Default)]
pub struct BudgetLedger {
    entries: Vec<BudgetEntry>,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an entry. Rejected input leaves the ledger unchanged.
    ///
    /// An amount that would push the total past `Cents::MAX` is rejected as
    /// invalid, so `total` can never overflow.
    pub fn add_entry(
        &mut self,
        category: &str,
        raw_amount: &str,
    ) -> Result<BudgetEntry, ValidationError> {
        let entry = BudgetEntry::parse(category, raw_amount)?;
        if self.total().checked_add(entry.amount_cents()).is_none() {
            return Err(ValidationError::InvalidAmount);
        }
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry amounts, 0 when empty.
    pub fn total(&self) -> Cents {
        self.entries.iter().map(BudgetEntry::amount_cents).sum()
    }

    /// One row per entry in insertion order. Entries sharing a category are
    /// not merged, so each one gets its own bar.
    pub fn summary(&self) -> Vec<SummaryRow> {
        self.entries
            .iter()
            .map(|entry| SummaryRow {
                category: entry.category().to_string(),
                amount_cents: entry.amount_cents(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger() {
        let ledger = BudgetLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0);
        assert!(ledger.summary().is_empty());
    }

    #[test]
    fn test_rent_and_food() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("Rent", "1200.00").unwrap();
        ledger.add_entry("Food", "300.50").unwrap();

        assert_eq!(ledger.total(), 150050);
        assert_eq!(
            ledger.summary(),
            vec![
                SummaryRow {
                    category: "Rent".into(),
                    amount_cents: 120000
                },
                SummaryRow {
                    category: "Food".into(),
                    amount_cents: 30050
                },
            ]
        );
    }

    #[test]
    fn test_rejected_entries_leave_ledger_untouched() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("Rent", "1200").unwrap();

        assert_eq!(
            ledger.add_entry("Food", "0"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            ledger.add_entry("Food", "-10"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            ledger.add_entry("", "50"),
            Err(ValidationError::MissingCategory)
        );

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), 120000);
    }

    #[test]
    fn test_duplicate_categories_are_not_merged() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("Food", "10").unwrap();
        ledger.add_entry("Rent", "20").unwrap();
        ledger.add_entry("Food", "5.25").unwrap();

        let categories: Vec<_> = ledger
            .summary()
            .into_iter()
            .map(|row| row.category)
            .collect();
        assert_eq!(categories, vec!["Food", "Rent", "Food"]);
        assert_eq!(ledger.total(), 3525);
    }

    #[test]
    fn test_entry_that_would_overflow_total_is_rejected() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("A", "90000000000000000").unwrap();

        assert_eq!(
            ledger.add_entry("B", "90000000000000000"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), 9_000_000_000_000_000_000);

        ledger.add_entry("C", "0.01").unwrap();
        assert_eq!(ledger.total(), 9_000_000_000_000_000_001);
    }

    #[test]
    fn test_total_is_idempotent() {
        let mut ledger = BudgetLedger::new();
        ledger.add_entry("Travel", "99.99").unwrap();
        assert_eq!(ledger.total(), ledger.total());
    }
}
