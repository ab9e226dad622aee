use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::MarketConfig;
use crate::domain::{
    BudgetEntry, BudgetLedger, Cents, Interval, InvestmentAdvice, MarketPrediction, MarketQuote,
    MarketSeries, SeriesKind, SummaryRow, ValidationError, investment_advice, parse_cents,
};
use crate::market::{AlphaVantageClient, MarketDataClient};
use crate::report::{Chart, ChartRenderer, ExportError, ReportFormat, ReportRenderer};

use super::{AppError, BudgetReport};

/// Session controller. Owns the ledger for the lifetime of one interactive
/// session and routes user actions to the market and report collaborators.
pub struct FinanceSession {
    ledger: BudgetLedger,
    market: Arc<dyn MarketDataClient>,
    renderer: Box<dyn ReportRenderer + Send + Sync>,
    symbol: String,
    intraday: SeriesKind,
}

impl FinanceSession {
    /// Session wired to Alpha Vantage and the chart renderer.
    pub fn new(config: MarketConfig) -> Result<Self, AppError> {
        let symbol = config.symbol.clone();
        let interval = config.interval;
        let market = Arc::new(AlphaVantageClient::new(config)?);
        let renderer = Box::new(ChartRenderer::default());
        Ok(Self::with_parts(market, renderer, &symbol).with_interval(interval))
    }

    pub fn with_parts(
        market: Arc<dyn MarketDataClient>,
        renderer: Box<dyn ReportRenderer + Send + Sync>,
        symbol: &str,
    ) -> Self {
        Self {
            ledger: BudgetLedger::new(),
            market,
            renderer,
            symbol: symbol.to_string(),
            intraday: SeriesKind::Intraday(Interval::default()),
        }
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.intraday = SeriesKind::Intraday(interval);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a budget line item.
    pub fn add_entry(&mut self, category: &str, raw_amount: &str) -> Result<BudgetEntry, AppError> {
        let entry = self.ledger.add_entry(category, raw_amount)?;
        info!(
            category = entry.category(),
            amount_cents = entry.amount_cents(),
            "budget entry added"
        );
        Ok(entry)
    }

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub fn total(&self) -> Cents {
        self.ledger.total()
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        self.ledger.summary()
    }

    pub fn report(&self) -> BudgetReport {
        BudgetReport::from_ledger(&self.ledger)
    }

    // ========================
    // Market operations
    // ========================

    /// Latest closing price of `symbol` for the given series.
    pub async fn fetch_latest_close(
        &self,
        symbol: &str,
        kind: SeriesKind,
    ) -> Result<MarketQuote, AppError> {
        let quote = self.market.latest_close(symbol, kind).await?;
        info!(
            symbol = %quote.symbol,
            close = quote.closing_price,
            as_of = %quote.as_of,
            "quote fetched"
        );
        Ok(quote)
    }

    /// Validate the budget, fetch the daily close and apply the allocation rule.
    /// The budget is checked before any request is made.
    pub async fn investment_advice(&self, raw_budget: &str) -> Result<InvestmentAdvice, AppError> {
        let budget = parse_budget(raw_budget)?;
        let quote = self
            .fetch_latest_close(&self.symbol, SeriesKind::Daily)
            .await?;
        Ok(investment_advice(budget, &quote))
    }

    pub async fn market_prediction(&self) -> Result<MarketPrediction, AppError> {
        let kind = self.intraday;
        let quote = self.fetch_latest_close(&self.symbol, kind).await?;
        Ok(MarketPrediction { quote })
    }

    /// Intraday series for the market movement chart.
    pub async fn market_movement(&self) -> Result<MarketSeries, AppError> {
        let kind = self.intraday;
        Ok(self.market.time_series(&self.symbol, kind).await?)
    }

    // ========================
    // Export operations
    // ========================

    /// Render the budget chart to `path`. The format comes from `format` when
    /// given, otherwise from the path extension.
    pub fn export_report(&self, path: &Path, format: Option<&str>) -> Result<PathBuf, AppError> {
        let format = ReportFormat::resolve(format, path)?;
        let chart = Chart::budget(&self.ledger.summary());
        export_chart(self.renderer.as_ref(), &chart, path, format)?;
        Ok(path.to_path_buf())
    }

    /// Fetch the intraday series and render it as a line chart.
    pub async fn export_market_chart(
        &self,
        path: &Path,
        format: Option<&str>,
    ) -> Result<PathBuf, AppError> {
        let format = ReportFormat::resolve(format, path)?;
        let series = self.market_movement().await?;
        let chart = Chart::market(&series);
        export_chart(self.renderer.as_ref(), &chart, path, format)?;
        Ok(path.to_path_buf())
    }
}

/// Render `chart` through any renderer. Exposed for callers holding a summary
/// without a session.
pub fn export_chart(
    renderer: &dyn ReportRenderer,
    chart: &Chart,
    path: &Path,
    format: ReportFormat,
) -> Result<(), ExportError> {
    renderer.render(chart, path, format)
}

fn parse_budget(raw: &str) -> Result<Cents, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingBudget);
    }
    parse_cents(raw).map_err(|_| ValidationError::InvalidAmount)
}
