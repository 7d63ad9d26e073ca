use std::path::Path;

use plotters::prelude::*;

use super::{apply_axis_borders, category_label, draw_frame, draw_png, FONT_FAMILY};
use crate::color::{blend_over, parse_color};
use crate::data::aggregate::GroupStat;
use crate::error::{DashboardError, Result};
use crate::style::RangeStyle;

/// Horizontal extent of one group's bars after clamping to the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RangeBars<'a> {
    /// `[min, max]`
    pub range: (f64, f64),
    /// `[min, mean]`
    pub mean: (f64, f64),
    /// Overlay color name picked by the rating threshold.
    pub mean_color: &'a str,
}

/// The configured value interval, ordered low to high.
fn value_axis(style: &RangeStyle) -> (f64, f64) {
    let (a, b) = style.x_range;
    (a.min(b), a.max(b))
}

pub(crate) fn range_bars<'a>(stats: &GroupStat, style: &'a RangeStyle) -> Vec<(String, RangeBars<'a>)> {
    let (lo, hi) = value_axis(style);
    let clamp = |v: f64| v.clamp(lo, hi);
    stats
        .iter()
        .map(|(group, s)| {
            let bars = RangeBars {
                range: (clamp(s.min), clamp(s.max)),
                mean: (clamp(s.min), clamp(s.mean)),
                mean_color: style.mean_color(s.mean),
            };
            (group.clone(), bars)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Range / dumbbell chart (customer rating per shipment mode)
// ---------------------------------------------------------------------------

/// Render one horizontal row per group: a wide faint bar over `[min, max]`
/// and a narrow overlay over `[min, mean]` colored by the rating threshold.
pub fn render_range_chart(stats: &GroupStat, style: &RangeStyle, path: &Path) -> Result<()> {
    let err = |e: String| DashboardError::render(path, e);
    let range_color = parse_color(&style.range_color).map_err(err)?;
    let range_color = blend_over(range_color, style.range_opacity, WHITE);
    let border_color = parse_color(&style.chart.border_color).map_err(err)?;

    let rows = range_bars(stats, style);
    let mean_colors = rows
        .iter()
        .map(|(_, bars)| parse_color(bars.mean_color))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(err)?;
    let labels: Vec<String> = rows.iter().map(|(group, _)| group.clone()).collect();
    let n = labels.len().max(1);
    let (x_lo, x_hi) = value_axis(style);
    let range_half = style.range_height / 2.0;
    let mean_half = style.mean_height / 2.0;
    let chart_style = &style.chart;

    draw_png(path, chart_style.size, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(&chart_style.title, (FONT_FAMILY, chart_style.title_size()))
            .margin(15)
            .x_label_area_size(chart_style.font_size * 3)
            .y_label_area_size(chart_style.font_size * 6)
            .build_cartesian_2d(x_lo..x_hi, -0.5f64..(n as f64 - 0.5))?;

        let y_formatter = |y: &f64| category_label(&labels, *y);
        let x_formatter = |x: &f64| format!("{x:.1}");

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .y_labels(n + 1)
            .y_label_formatter(&y_formatter)
            .x_label_formatter(&x_formatter)
            .label_style((FONT_FAMILY, chart_style.font_size))
            .axis_desc_style((FONT_FAMILY, chart_style.font_size))
            .axis_style(border_color);
        if !chart_style.x_label.is_empty() {
            mesh.x_desc(chart_style.x_label.as_str());
        }
        if !chart_style.y_label.is_empty() {
            mesh.y_desc(chart_style.y_label.as_str());
        }
        apply_axis_borders(&mut mesh, &chart_style.borders);
        mesh.draw()?;

        chart.draw_series(rows.iter().enumerate().map(|(i, (_, bars))| {
            let y = i as f64;
            Rectangle::new(
                [(bars.range.0, y - range_half), (bars.range.1, y + range_half)],
                range_color.filled(),
            )
        }))?;

        chart.draw_series(rows.iter().zip(&mean_colors).enumerate().map(
            |(i, ((_, bars), color))| {
                let y = i as f64;
                Rectangle::new(
                    [(bars.mean.0, y - mean_half), (bars.mean.1, y + mean_half)],
                    color.filled(),
                )
            },
        ))?;

        draw_frame(
            root,
            chart.plotting_area().get_pixel_range(),
            &chart_style.borders,
            border_color,
        )?;
        Ok(())
    })
}
