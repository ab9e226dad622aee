// Market data collaborators: the client contract, the Alpha Vantage implementation
// and the HTTP transport underneath it.

mod alphavantage;
pub mod http_client;

pub use alphavantage::*;

use std::future::Future;
use std::pin::Pin;

use crate::domain::{FetchError, MarketQuote, MarketSeries, SeriesKind};

/// Source of closing-price time series.
pub trait MarketDataClient: Send + Sync {
    /// Fetch a series, entries ordered as the provider returned them (latest first).
    fn time_series<'a>(
        &'a self,
        symbol: &'a str,
        kind: SeriesKind,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSeries, FetchError>> + Send + 'a>>;

    /// Most recent closing price for `symbol`.
    fn latest_close<'a>(
        &'a self,
        symbol: &'a str,
        kind: SeriesKind,
    ) -> Pin<Box<dyn Future<Output = Result<MarketQuote, FetchError>> + Send + 'a>> {
        Box::pin(async move { self.time_series(symbol, kind).await?.latest_quote() })
    }
}
