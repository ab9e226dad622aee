// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use finai::FinanceSession;
use finai::config::MarketConfig;
use finai::market::AlphaVantageClient;
use finai::market::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use finai::report::{Chart, ChartRenderer, ExportError, ReportFormat, ReportRenderer};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_BASE_URL: &str = "https://stub.test/query";

/// Daily payload, latest first, as Alpha Vantage returns it.
pub const DAILY_PAYLOAD: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Prices (open, high, low, close) and Volumes",
        "2. Symbol": "AAPL"
    },
    "Time Series (Daily)": {
        "2024-05-03": {"1. open": "186.6500", "2. high": "187.0000", "3. low": "182.6600", "4. close": "183.3800", "5. volume": "163224109"},
        "2024-05-02": {"1. open": "172.5100", "2. high": "173.4150", "3. low": "170.8900", "4. close": "173.0300", "5. volume": "94214915"}
    }
}"#;

pub const INTRADAY_PAYLOAD: &str = r#"{
    "Meta Data": {"2. Symbol": "AAPL", "4. Interval": "1min"},
    "Time Series (1min)": {
        "2024-05-03 19:59:00": {"1. open": "183.2000", "4. close": "183.2500"},
        "2024-05-03 19:58:00": {"1. open": "183.1000", "4. close": "183.1900"},
        "2024-05-03 19:57:00": {"1. open": "183.0500", "4. close": "183.1000"}
    }
}"#;

/// Daily payload whose older entry lacks a close.
pub const PARTIAL_DAILY_PAYLOAD: &str = r#"{
    "Time Series (Daily)": {
        "2024-05-03": {"1. open": "186.6500", "4. close": "183.3800"},
        "2024-05-02": {"1. open": "172.5100"}
    }
}"#;

pub const RATE_LIMITED_PAYLOAD: &str =
    r#"{"Information": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;

/// Transport returning canned bodies keyed by the `function` parameter and
/// recording every request it sees.
#[derive(Default)]
pub struct StubHttpClient {
    responses: HashMap<String, String>,
    failure: Option<String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, function: &str, body: &str) -> Self {
        self.responses.insert(function.to_string(), body.to_string());
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Daily and 1min intraday payloads.
    pub fn standard() -> Self {
        Self::new()
            .with_response("TIME_SERIES_DAILY", DAILY_PAYLOAD)
            .with_response("TIME_SERIES_INTRADAY", INTRADAY_PAYLOAD)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for StubHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let result = match &self.failure {
            Some(message) => Err(HttpError(message.clone())),
            None => {
                let body = request
                    .param("function")
                    .and_then(|function| self.responses.get(function))
                    .cloned()
                    .unwrap_or_else(|| "{}".to_string());
                Ok(HttpResponse::ok(body))
            }
        };
        self.requests.lock().unwrap().push(request);
        Box::pin(async move { result })
    }
}

/// Renderer that records what it was asked to draw instead of drawing it.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<(Chart, PathBuf, ReportFormat)>>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<(Chart, PathBuf, ReportFormat)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReportRenderer for RecordingRenderer {
    fn render(&self, chart: &Chart, path: &Path, format: ReportFormat) -> Result<(), ExportError> {
        self.calls
            .lock()
            .unwrap()
            .push((chart.clone(), path.to_path_buf(), format));
        Ok(())
    }
}

pub fn test_config() -> MarketConfig {
    MarketConfig::default()
        .with_api_key(TEST_API_KEY)
        .with_base_url(TEST_BASE_URL)
}

/// Session over the given transport with the real chart renderer.
pub fn test_session(http: Arc<StubHttpClient>) -> FinanceSession {
    let client = AlphaVantageClient::with_http_client(http, test_config());
    let renderer = Box::new(ChartRenderer::default());
    FinanceSession::with_parts(Arc::new(client), renderer, "AAPL")
}

/// Session over the given transport with a recording renderer.
pub fn recording_session(http: Arc<StubHttpClient>) -> (FinanceSession, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let client = AlphaVantageClient::with_http_client(http, test_config());
    let session =
        FinanceSession::with_parts(Arc::new(client), Box::new(renderer.clone()), "AAPL");
    (session, renderer)
}
