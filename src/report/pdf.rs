use std::fs::File;
use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb,
};

use super::{Chart, ChartKind, ExportError, render_error};

// 8x6 inch page.
const PAGE_WIDTH_MM: f32 = 203.2;
const PAGE_HEIGHT_MM: f32 = 152.4;

/// Plot area inside the page, in millimetres from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: f32,
    bottom: f32,
    right: f32,
    top: f32,
}

impl PlotArea {
    fn page() -> Self {
        Self {
            left: 30.0,
            bottom: 28.0,
            right: PAGE_WIDTH_MM - 12.0,
            top: PAGE_HEIGHT_MM - 24.0,
        }
    }

    fn width(&self) -> f32 {
        self.right - self.left
    }

    fn height(&self) -> f32 {
        self.top - self.bottom
    }

    fn y_for(&self, value: f64, (low, high): (f64, f64)) -> f32 {
        let span = (high - low).max(f64::EPSILON);
        self.bottom + (((value - low) / span) as f32) * self.height()
    }
}

/// A filled bar: lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bar {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

fn bar_layout(values: &[f64], range: (f64, f64), area: PlotArea) -> Vec<Bar> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = area.width() / values.len() as f32;
    let gap = slot * 0.1;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x0 = area.left + slot * i as f32 + gap;
            Bar {
                x0,
                y0: area.bottom,
                x1: x0 + slot - 2.0 * gap,
                y1: area.y_for(*value, range),
            }
        })
        .collect()
}

fn line_layout(values: &[f64], range: (f64, f64), area: PlotArea) -> Vec<(f32, f32)> {
    let steps = values.len().saturating_sub(1).max(1) as f32;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            (
                area.left + area.width() * i as f32 / steps,
                area.y_for(*value, range),
            )
        })
        .collect()
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

fn stroke(layer: &PdfLayerReference, points: Vec<(Point, bool)>) {
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

pub(super) fn render_pdf(chart: &Chart, file: File) -> Result<(), ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        chart.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "chart",
    );
    let canvas = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;

    let area = PlotArea::page();
    let range = chart.value_range();

    draw_frame(&canvas, &font, chart, area, range);

    match chart.kind {
        ChartKind::Bar => {
            canvas.set_fill_color(Color::Rgb(Rgb::new(0.12, 0.47, 0.71, None)));
            let bars = bar_layout(&chart.values, range, area);
            let label_y = Mm(area.bottom - 6.0);
            for (bar, label) in bars.iter().zip(&chart.labels) {
                let rect = Rect::new(Mm(bar.x0), Mm(bar.y0), Mm(bar.x1), Mm(bar.y1));
                canvas.add_rect(rect);
                canvas.use_text(label.as_str(), 8.0, Mm(bar.x0), label_y, &font);
            }
        }
        ChartKind::Line => {
            canvas.set_outline_color(Color::Rgb(Rgb::new(0.84, 0.15, 0.16, None)));
            canvas.set_outline_thickness(1.0);
            let points: Vec<_> = line_layout(&chart.values, range, area)
                .into_iter()
                .map(|(x, y)| point(x, y))
                .collect();
            stroke(&canvas, points);

            // First and last timestamps only; the rest would overlap.
            if let (Some(first), Some(last)) = (chart.labels.first(), chart.labels.last()) {
                let label_y = Mm(area.bottom - 6.0);
                let last_x = Mm(area.right - 30.0);
                canvas.use_text(first.as_str(), 7.0, Mm(area.left), label_y, &font);
                canvas.use_text(last.as_str(), 7.0, last_x, label_y, &font);
            }
        }
    }

    doc.save(&mut BufWriter::new(file)).map_err(render_error)
}

fn draw_frame(
    canvas: &PdfLayerReference,
    font: &IndirectFontRef,
    chart: &Chart,
    area: PlotArea,
    (low, high): (f64, f64),
) {
    canvas.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    canvas.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    canvas.set_outline_thickness(0.5);

    let title_y = Mm(area.top + 10.0);
    canvas.use_text(chart.title.as_str(), 16.0, Mm(area.left), title_y, font);
    stroke(
        canvas,
        vec![
            point(area.left, area.top),
            point(area.left, area.bottom),
            point(area.right, area.bottom),
        ],
    );

    canvas.use_text(
        chart.x_label.as_str(),
        10.0,
        Mm(area.left + area.width() / 2.0 - 10.0),
        Mm(area.bottom - 16.0),
        font,
    );
    let y_label = chart.y_label.as_str();
    canvas.use_text(y_label, 10.0, Mm(4.0), Mm(area.top + 4.0), font);
    canvas.use_text(format!("{:.2}", low), 8.0, Mm(6.0), Mm(area.bottom), font);
    canvas.use_text(format!("{:.2}", high), 8.0, Mm(6.0), Mm(area.top), font);
}
