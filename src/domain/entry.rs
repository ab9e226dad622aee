use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Cents, parse_cents};

pub type EntryId = Uuid;

/// Rejected user input. The ledger is left untouched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid amount")]
    InvalidAmount,

    #[error("missing category")]
    MissingCategory,

    #[error("missing budget")]
    MissingBudget,
}

/// A single budget line item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    id: EntryId,
    category: String,
    amount_cents: Cents,
    recorded_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Validate raw user input and build an entry.
    ///
    /// The amount is checked first, then the category.
    pub fn parse(category: &str, raw_amount: &str) -> Result<Self, ValidationError> {
        let amount_cents = parse_cents(raw_amount).map_err(|_| ValidationError::InvalidAmount)?;
        Self::new(category, amount_cents)
    }

    pub fn new(category: &str, amount_cents: Cents) -> Result<Self, ValidationError> {
        if amount_cents <= 0 {
            return Err(ValidationError::InvalidAmount);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            category: category.to_string(),
            amount_cents,
            recorded_at: Utc::now(),
        })
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
