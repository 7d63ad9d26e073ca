use std::f64::consts::PI;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{draw_png, FONT_FAMILY};
use crate::color::ColorCycle;
use crate::data::aggregate::CategoryCount;
use crate::error::{DashboardError, Result};
use crate::style::DonutStyle;

/// Outer radius as a fraction of half the shorter side of the drawing area.
const RADIUS_FRACTION: f64 = 0.75;
/// Category labels sit this far out, relative to the outer radius.
const LABEL_DISTANCE: f64 = 1.12;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// One wedge of the ring, angles in degrees counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Wedge {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub percent: f64,
}

impl Wedge {
    fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Lay out wedges counter-clockwise from `start_angle`, one per category.
pub(crate) fn wedges(counts: &CategoryCount, start_angle: f64) -> Vec<Wedge> {
    let mut angle = start_angle;
    counts
        .percentages()
        .into_iter()
        .map(|(label, percent)| {
            let sweep = percent * 3.6;
            let wedge = Wedge {
                label: label.to_string(),
                start: angle,
                end: angle + sweep,
                percent,
            };
            angle += sweep;
            wedge
        })
        .collect()
}

/// Pixel position at `radius` and `angle_deg` around `center` (y grows downwards).
fn polar(center: (f64, f64), radius: f64, angle_deg: f64) -> (i32, i32) {
    let theta = angle_deg * PI / 180.0;
    (
        (center.0 + radius * theta.cos()).round() as i32,
        (center.1 - radius * theta.sin()).round() as i32,
    )
}

/// Closed outline of a ring segment: outer arc forwards, inner arc back.
fn ring_segment(center: (f64, f64), outer: f64, inner: f64, wedge: &Wedge) -> Vec<(i32, i32)> {
    let steps = ((wedge.end - wedge.start).abs() / 2.0).ceil().max(2.0) as usize;
    let at = |i: usize| wedge.start + (wedge.end - wedge.start) * i as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps).map(|i| polar(center, outer, at(i))).collect();
    points.extend((0..=steps).rev().map(|i| polar(center, inner, at(i))));
    points
}

// ---------------------------------------------------------------------------
// Donut chart (shipment mode proportions)
// ---------------------------------------------------------------------------

/// Render a ring chart with one wedge per category and percentage labels.
pub fn render_donut_chart(counts: &CategoryCount, style: &DonutStyle, path: &Path) -> Result<()> {
    let colors = ColorCycle::new(style.colors.as_slice()).map_err(|e| DashboardError::render(path, e))?;
    let ring_width = style.ring_width.clamp(0.0, 1.0);
    let precision = style.label_precision;
    let chart_style = &style.chart;
    let wedges = wedges(counts, style.start_angle);

    draw_png(path, chart_style.size, |root| {
        let area = root.titled(&chart_style.title, (FONT_FAMILY, chart_style.title_size()))?;

        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let outer = RADIUS_FRACTION * center.0.min(center.1);
        let inner = outer * (1.0 - ring_width);

        for (i, wedge) in wedges.iter().enumerate() {
            if wedge.percent <= 0.0 {
                continue;
            }
            area.draw(&Polygon::new(
                ring_segment(center, outer, inner, wedge),
                colors.color_at(i).filled(),
            ))?;
        }

        let text = TextStyle::from((FONT_FAMILY, chart_style.font_size).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        for wedge in &wedges {
            let mid = wedge.mid_angle();
            area.draw(&Text::new(
                format!("{:.*}%", precision, wedge.percent),
                polar(center, (outer + inner) / 2.0, mid),
                text.clone(),
            ))?;
            area.draw(&Text::new(
                wedge.label.clone(),
                polar(center, outer * LABEL_DISTANCE, mid),
                text.clone(),
            ))?;
        }
        Ok(())
    })
}
