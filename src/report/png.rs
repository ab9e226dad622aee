use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{Chart, ChartKind, ExportError, render_error};

const CAPTION_FONT: (&str, f64) = ("sans-serif", 28.0);

pub(super) fn render_png(chart: &Chart, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    match chart.kind {
        ChartKind::Bar => draw_bars(&root, chart)?,
        ChartKind::Line => draw_line(&root, chart)?,
    }

    root.present().map_err(render_error)
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> Result<(), ExportError> {
    let slots = chart.values.len().max(1);
    let (_, y_max) = chart.value_range();

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)
        .map_err(render_error)?;

    let label_of = |value: &SegmentValue<usize>| match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            chart.labels.get(*i).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&label_of)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()
        .map_err(render_error)?;

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(BLUE.filled())
            .margin(10)
            .data(chart.values.iter().copied().enumerate()),
    )
    .map_err(render_error)?;

    Ok(())
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> Result<(), ExportError> {
    let last_index = chart.values.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = chart.value_range();

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..last_index, y_min..y_max)
        .map_err(render_error)?;

    let label_of = |x: &f64| {
        chart
            .labels
            .get(x.round().max(0.0) as usize)
            .cloned()
            .unwrap_or_default()
    };

    ctx.configure_mesh()
        .x_labels(5)
        .x_label_formatter(&label_of)
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()
        .map_err(render_error)?;

    let points = chart
        .values
        .iter()
        .enumerate()
        .map(|(i, close)| (i as f64, *close));
    ctx.draw_series(LineSeries::new(points, &RED))
        .map_err(render_error)?;

    Ok(())
}
