mod pdf;
mod png;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{MarketSeries, SummaryRow, cents_to_f64};

/// Canvas size of exported charts, 8x6 inches at 100 dpi.
pub const CHART_SIZE_PX: (u32, u32) = (800, 600);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported report format: {0} (expected png or pdf)")]
    UnsupportedFormat(String),

    #[error("failed to render report: {0}")]
    Render(String),
}

fn render_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

fn unsupported(name: &str) -> ExportError {
    ExportError::UnsupportedFormat(name.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Png,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Png => "png",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "png" => Some(ReportFormat::Png),
            "pdf" => Some(ReportFormat::Pdf),
            _ => None,
        }
    }

    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.is_empty() {
            return Err(unsupported(&path.display().to_string()));
        }
        Self::from_str(extension).ok_or_else(|| unsupported(extension))
    }

    /// Explicit format name if given, otherwise the path extension.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> Result<Self, ExportError> {
        match explicit {
            Some(name) => Self::from_str(name).ok_or_else(|| unsupported(name)),
            None => Self::from_path(path),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Backend-independent description of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Chart {
    /// One bar per summary row, in row order.
    pub fn budget(rows: &[SummaryRow]) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: "Budget Graph".to_string(),
            x_label: "Category".to_string(),
            y_label: "Budget Amount".to_string(),
            labels: rows.iter().map(|row| row.category.clone()).collect(),
            values: rows
                .iter()
                .map(|row| cents_to_f64(row.amount_cents))
                .collect(),
        }
    }

    /// Closing prices oldest to newest.
    pub fn market(series: &MarketSeries) -> Self {
        let (labels, values): (Vec<String>, Vec<f64>) = series
            .chronological()
            .map(|point| (point.timestamp.clone(), point.close))
            .unzip();
        Self {
            kind: ChartKind::Line,
            title: format!("Market Movement {}", series.symbol),
            x_label: "Time".to_string(),
            y_label: "Closing Price".to_string(),
            labels,
            values,
        }
    }

    /// Value axis range. Bars start at zero; lines hug the data.
    pub fn value_range(&self) -> (f64, f64) {
        let values = self.values.iter().copied();
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let min = values.fold(f64::INFINITY, f64::min);
        if !max.is_finite() || !min.is_finite() {
            return (0.0, 1.0);
        }

        match self.kind {
            ChartKind::Bar => (0.0, if max > 0.0 { max * 1.1 } else { 1.0 }),
            ChartKind::Line => {
                let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
                (min - pad, max + pad)
            }
        }
    }
}

/// Serializes charts to files.
pub trait ReportRenderer {
    fn render(&self, chart: &Chart, path: &Path, format: ReportFormat) -> Result<(), ExportError>;
}

/// Renders PNG through plotters and PDF through printpdf.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    size_px: (u32, u32),
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            size_px: CHART_SIZE_PX,
        }
    }
}

impl ChartRenderer {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size_px: (width, height),
        }
    }
}

impl ReportRenderer for ChartRenderer {
    fn render(&self, chart: &Chart, path: &Path, format: ReportFormat) -> Result<(), ExportError> {
        // Creating the file up front turns an unwritable target into an Io error
        // instead of a backend-specific one.
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), %format, points = chart.values.len(), "rendering chart");

        let result = match format {
            ReportFormat::Png => {
                drop(file);
                png::render_png(chart, path, self.size_px)
            }
            ReportFormat::Pdf => pdf::render_pdf(chart, file),
        };

        match result {
            Ok(()) => {
                info!(path = %path.display(), %format, "report written");
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(path);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, SeriesKind};

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ReportFormat::from_path(Path::new("out/report.PNG")).unwrap(),
            ReportFormat::Png
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("report.pdf")).unwrap(),
            ReportFormat::Pdf
        );
        assert!(matches!(
            ReportFormat::from_path(Path::new("report.svg")),
            Err(ExportError::UnsupportedFormat(ext)) if ext == "svg"
        ));
        assert!(ReportFormat::from_path(Path::new("report")).is_err());
    }

    #[test]
    fn test_explicit_format_wins() {
        let format = ReportFormat::resolve(Some("pdf"), Path::new("report.png")).unwrap();
        assert_eq!(format, ReportFormat::Pdf);
        assert!(ReportFormat::resolve(Some("jpeg"), Path::new("report.png")).is_err());
    }

    #[test]
    fn test_budget_chart_keeps_one_bar_per_row() {
        let rows = vec![
            SummaryRow {
                category: "Food".into(),
                amount_cents: 1000,
            },
            SummaryRow {
                category: "Food".into(),
                amount_cents: 525,
            },
        ];
        let chart = Chart::budget(&rows);
        assert_eq!(chart.labels, vec!["Food", "Food"]);
        assert_eq!(chart.values, vec![10.0, 5.25]);
        assert_eq!(chart.title, "Budget Graph");
        let (low, high) = chart.value_range();
        assert_eq!(low, 0.0);
        assert!(high > 10.0);
    }

    #[test]
    fn test_market_chart_is_chronological() {
        let series = MarketSeries {
            symbol: "AAPL".into(),
            kind: SeriesKind::Daily,
            points: vec![
                PricePoint {
                    timestamp: "t2".into(),
                    close: 2.0,
                },
                PricePoint {
                    timestamp: "t1".into(),
                    close: 1.0,
                },
            ],
        };
        let chart = Chart::market(&series);
        assert_eq!(chart.title, "Market Movement AAPL");
        assert_eq!(chart.labels, vec!["t1", "t2"]);
        assert_eq!(chart.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_empty_chart_range() {
        let chart = Chart::budget(&[]);
        assert_eq!(chart.value_range(), (0.0, 1.0));
    }
}
