use std::path::Path;

use plotters::prelude::*;

use super::{apply_axis_borders, category_label, count_axis_top, draw_frame, draw_png, FONT_FAMILY};
use crate::color::parse_color;
use crate::data::aggregate::CategoryCount;
use crate::error::{DashboardError, Result};
use crate::style::BarStyle;

/// Half of a bar's width in category units.
const BAR_HALF_WIDTH: f64 = 0.25;

// ---------------------------------------------------------------------------
// Vertical bar chart (record count per warehouse)
// ---------------------------------------------------------------------------

/// Render one vertical bar per category, in the order of `counts`.
pub fn render_bar_chart(counts: &CategoryCount, style: &BarStyle, path: &Path) -> Result<()> {
    let bar_color = parse_color(&style.color).map_err(|e| DashboardError::render(path, e))?;
    let border_color =
        parse_color(&style.chart.border_color).map_err(|e| DashboardError::render(path, e))?;

    let labels: Vec<String> = counts.labels().map(str::to_string).collect();
    let n = labels.len().max(1);
    let y_top = count_axis_top(counts.max_count());
    let chart_style = &style.chart;

    draw_png(path, chart_style.size, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(&chart_style.title, (FONT_FAMILY, chart_style.title_size()))
            .margin(15)
            .x_label_area_size(chart_style.font_size * 3)
            .y_label_area_size(chart_style.font_size * 5)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_top)?;

        let x_formatter = |x: &f64| category_label(&labels, *x);
        let y_formatter = |y: &f64| format!("{y:.0}");

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(n + 1)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc(chart_style.x_label.as_str())
            .y_desc(chart_style.y_label.as_str())
            .label_style((FONT_FAMILY, chart_style.font_size))
            .axis_desc_style((FONT_FAMILY, chart_style.font_size))
            .axis_style(border_color);
        apply_axis_borders(&mut mesh, &chart_style.borders);
        mesh.draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, count as f64)],
                bar_color.filled(),
            )
        }))?;

        draw_frame(
            root,
            chart.plotting_area().get_pixel_range(),
            &chart_style.borders,
            border_color,
        )?;
        Ok(())
    })
}
