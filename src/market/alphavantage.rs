use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::MarketDataClient;
use super::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::config::MarketConfig;
use crate::domain::{FetchError, MarketQuote, MarketSeries, PricePoint, SeriesKind};

/// Field holding the closing price inside each series entry.
const CLOSE_FIELD: &str = "4. close";

/// Fields the provider uses to explain why no series was returned.
const NOTICE_FIELDS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Alpha Vantage time-series client.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    config: MarketConfig,
}

impl AlphaVantageClient {
    pub fn new(config: MarketConfig) -> Result<Self, FetchError> {
        let http_client =
            ReqwestHttpClient::new().map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_http_client(Arc::new(http_client), config))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: MarketConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn build_request(&self, symbol: &str, kind: SeriesKind) -> HttpRequest {
        let mut request = HttpRequest::get(&self.config.base_url)
            .with_param("function", kind.function())
            .with_param("symbol", symbol);
        if let Some(interval) = kind.interval() {
            request = request.with_param("interval", interval.as_str());
        }
        request
            .with_param("apikey", &self.config.api_key)
            .with_timeout(self.config.timeout)
    }

    async fn fetch_body(&self, symbol: &str, kind: SeriesKind) -> Result<String, FetchError> {
        let request = self.build_request(symbol, kind);
        debug!(symbol, function = kind.function(), "requesting series");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        // The status code is not inspected; the body alone decides.
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(response.body)
    }
}

impl MarketDataClient for AlphaVantageClient {
    fn time_series<'a>(
        &'a self,
        symbol: &'a str,
        kind: SeriesKind,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSeries, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.fetch_body(symbol, kind).await?;
            parse_time_series(&body, symbol, kind)
        })
    }

    fn latest_close<'a>(
        &'a self,
        symbol: &'a str,
        kind: SeriesKind,
    ) -> Pin<Box<dyn Future<Output = Result<MarketQuote, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.fetch_body(symbol, kind).await?;
            parse_latest_close(&body, symbol, kind)
        })
    }
}

/// Parse a full Alpha Vantage payload, keeping entries in the order the
/// provider sent them. Every entry must carry a usable close.
pub fn parse_time_series(
    body: &str,
    symbol: &str,
    kind: SeriesKind,
) -> Result<MarketSeries, FetchError> {
    let payload = parse_payload(body)?;
    let entries = series_entries(&payload, symbol, kind)?;

    let points = entries
        .iter()
        .map(|(timestamp, entry)| {
            Ok(PricePoint {
                timestamp: timestamp.clone(),
                close: entry_close(timestamp, entry)?,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    debug!(symbol, points = points.len(), "parsed time series");
    Ok(MarketSeries {
        symbol: symbol.to_string(),
        kind,
        points,
    })
}

/// Read only the first entry of the payload, the latest one. Older entries
/// are not inspected.
pub fn parse_latest_close(
    body: &str,
    symbol: &str,
    kind: SeriesKind,
) -> Result<MarketQuote, FetchError> {
    let payload = parse_payload(body)?;
    let entries = series_entries(&payload, symbol, kind)?;

    let Some((timestamp, entry)) = entries.iter().next() else {
        let reason = format!("'{}' contains no entries", kind.series_key());
        return Err(FetchError::malformed(reason));
    };

    Ok(MarketQuote {
        symbol: symbol.to_string(),
        closing_price: entry_close(timestamp, entry)?,
        as_of: timestamp.clone(),
    })
}

fn parse_payload(body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("response is not valid JSON: {e}")))
}

/// The object nested under the series key, or the provider's notice when absent.
fn series_entries<'p>(
    payload: &'p Value,
    symbol: &str,
    kind: SeriesKind,
) -> Result<&'p Map<String, Value>, FetchError> {
    let key = kind.series_key();
    let Some(series) = payload.get(&key) else {
        let notice = NOTICE_FIELDS
            .iter()
            .find_map(|field| payload.get(*field).and_then(Value::as_str));
        warn!(symbol, key = %key, notice, "time series missing from response");
        return Err(FetchError::malformed(match notice {
            Some(notice) => format!("missing '{key}' ({notice})"),
            None => format!("missing '{key}'"),
        }));
    };

    series
        .as_object()
        .ok_or_else(|| FetchError::malformed(format!("'{key}' is not an object")))
}

fn entry_close(timestamp: &str, entry: &Value) -> Result<f64, FetchError> {
    let Some(close) = entry.get(CLOSE_FIELD).and_then(close_value) else {
        let reason = format!("entry '{timestamp}' has no usable '{CLOSE_FIELD}'");
        return Err(FetchError::malformed(reason));
    };
    Ok(close)
}

/// The provider sends prices as strings; accept bare numbers too.
fn close_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .filter(|price: &f64| price.is_finite())
}
