use std::path::Path;

use plotters::prelude::*;

use super::{apply_axis_borders, count_axis_top, draw_frame, draw_png, FONT_FAMILY};
use crate::color::parse_color;
use crate::data::aggregate::HistogramBins;
use crate::error::{DashboardError, Result};
use crate::style::HistogramStyle;

// ---------------------------------------------------------------------------
// Histogram (shipped weight distribution)
// ---------------------------------------------------------------------------

/// Render contiguous bins as filled bars outlined in the edge color.
pub fn render_histogram(bins: &HistogramBins, style: &HistogramStyle, path: &Path) -> Result<()> {
    let err = |e: String| DashboardError::render(path, e);
    let fill = parse_color(&style.fill_color).map_err(err)?;
    let edge = parse_color(&style.edge_color).map_err(err)?;
    let border_color = parse_color(&style.chart.border_color).map_err(err)?;

    let (x_lo, x_hi) = bins.range().unwrap_or((0.0, 1.0));
    let y_top = count_axis_top(bins.max_count());
    let chart_style = &style.chart;

    draw_png(path, chart_style.size, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(&chart_style.title, (FONT_FAMILY, chart_style.title_size()))
            .margin(15)
            .x_label_area_size(chart_style.font_size * 3)
            .y_label_area_size(chart_style.font_size * 5)
            .build_cartesian_2d(x_lo..x_hi, 0f64..y_top)?;

        let x_formatter = |x: &f64| format!("{x:.0}");
        let y_formatter = |y: &f64| format!("{y:.0}");

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(8)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc(chart_style.x_label.as_str())
            .y_desc(chart_style.y_label.as_str())
            .label_style((FONT_FAMILY, chart_style.font_size))
            .axis_desc_style((FONT_FAMILY, chart_style.font_size))
            .axis_style(border_color);
        apply_axis_borders(&mut mesh, &chart_style.borders);
        mesh.draw()?;

        let rects = || {
            bins.bins()
                .iter()
                .map(|b| [(b.start, 0.0), (b.end, b.count as f64)])
        };
        chart.draw_series(rects().map(|r| Rectangle::new(r, fill.filled())))?;
        chart.draw_series(rects().map(|r| Rectangle::new(r, edge.stroke_width(1))))?;

        draw_frame(
            root,
            chart.plotting_area().get_pixel_range(),
            &chart_style.borders,
            border_color,
        )?;
        Ok(())
    })
}
