use std::fmt;
use std::time::Duration;

use crate::domain::Interval;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the market data provider.
#[derive(Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub api_key: String,
    pub base_url: String,
    pub symbol: String,
    pub interval: Interval,
    pub timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            interval: Interval::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl MarketConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Symbols are sent upper-cased.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.trim().to_uppercase();
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the API key out of `{:?}` output and logs.
impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("symbol", &self.symbol)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.symbol, "AAPL");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.interval, Interval::OneMinute);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_symbol_is_normalized() {
        let config = MarketConfig::default().with_symbol(" msft ");
        assert_eq!(config.symbol, "MSFT");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = MarketConfig::default().with_api_key("secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("***"));
    }
}
