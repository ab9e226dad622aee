use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market data could not be obtained. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("market data request failed: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        FetchError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Intraday sampling interval accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "60min")]
    SixtyMinutes,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1min",
            Interval::FiveMinutes => "5min",
            Interval::FifteenMinutes => "15min",
            Interval::ThirtyMinutes => "30min",
            Interval::SixtyMinutes => "60min",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1min" => Some(Interval::OneMinute),
            "5min" => Some(Interval::FiveMinutes),
            "15min" => Some(Interval::FifteenMinutes),
            "30min" => Some(Interval::ThirtyMinutes),
            "60min" => Some(Interval::SixtyMinutes),
            _ => None,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which time series to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Daily,
    Intraday(Interval),
}

impl SeriesKind {
    /// Value of the `function` query parameter.
    pub fn function(&self) -> &'static str {
        match self {
            SeriesKind::Daily => "TIME_SERIES_DAILY",
            SeriesKind::Intraday(_) => "TIME_SERIES_INTRADAY",
        }
    }

    /// Top-level key under which the provider nests the series.
    pub fn series_key(&self) -> String {
        match self {
            SeriesKind::Daily => "Time Series (Daily)".to_string(),
            SeriesKind::Intraday(interval) => format!("Time Series ({})", interval),
        }
    }

    pub fn interval(&self) -> Option<Interval> {
        match self {
            SeriesKind::Daily => None,
            SeriesKind::Intraday(interval) => Some(*interval),
        }
    }
}

/// A symbol's most recent closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub closing_price: f64,
    /// Timestamp key the price was read from, as reported by the provider.
    pub as_of: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub close: f64,
}

/// Closing prices in provider order, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    pub symbol: String,
    pub kind: SeriesKind,
    pub points: Vec<PricePoint>,
}

impl MarketSeries {
    /// The first point of the series, which the provider guarantees is the latest.
    pub fn latest_quote(&self) -> Result<MarketQuote, FetchError> {
        let latest = self.points.first().ok_or_else(|| {
            FetchError::malformed(format!("'{}' contains no entries", self.kind.series_key()))
        })?;

        Ok(MarketQuote {
            symbol: self.symbol.clone(),
            closing_price: latest.close,
            as_of: latest.timestamp.clone(),
        })
    }

    /// Points oldest first, for plotting left to right.
    pub fn chronological(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter().rev()
    }
}
