use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cents, MarketQuote};

/// Share of the budget recommended for the quoted symbol.
pub const ALLOCATION_PERCENT: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAdvice {
    pub symbol: String,
    pub budget_cents: Cents,
    pub allocation_cents: Cents,
    pub closing_price: f64,
}

/// Fixed-rule advice: put [`ALLOCATION_PERCENT`] of the budget into the quoted symbol.
/// The budget's magnitude is not checked.
pub fn investment_advice(budget_cents: Cents, quote: &MarketQuote) -> InvestmentAdvice {
    InvestmentAdvice {
        symbol: quote.symbol.clone(),
        budget_cents,
        allocation_cents: budget_cents.saturating_mul(ALLOCATION_PERCENT) / 100,
        closing_price: quote.closing_price,
    }
}

impl fmt::Display for InvestmentAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invest {}% of your budget in {} shares. Latest closing price: ${:.2}",
            ALLOCATION_PERCENT, self.symbol, self.closing_price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrediction {
    pub quote: MarketQuote,
}

impl fmt::Display for MarketPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Market prediction: Current closing price of {}: ${:.2}",
            self.quote.symbol, self.quote.closing_price
        )
    }
}
