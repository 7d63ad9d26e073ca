//! Chart rendering: each aggregated view becomes one PNG file.
//!
//! All charts draw onto a plotters `BitMapBackend`. Text uses the bundled
//! DejaVu Sans face, registered once as the `sans-serif` family, so no
//! system font lookup takes place.

pub mod bar;
pub mod donut;
pub mod histogram;
pub mod range;

use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::ranged1d::ValueFormatter;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::error::{DashboardError, Result};
use crate::style::Borders;

pub use bar::render_bar_chart;
pub use donut::render_donut_chart;
pub use histogram::render_histogram;
pub use range::render_range_chart;

pub(crate) const FONT_FAMILY: &str = "sans-serif";

const FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

pub(crate) type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn ensure_font() -> std::result::Result<(), String> {
    FONT.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
            .map_err(|_| "bundled font could not be parsed".to_string())
    })
    .clone()
}

/// Draw one PNG at `path`, overwriting any existing file.
///
/// The canvas is filled white before `draw` runs; the image is encoded when
/// `draw` returns successfully.
pub(crate) fn draw_png<F>(path: &Path, size: (u32, u32), draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> DrawResult<()>,
{
    ensure_font().map_err(|e| DashboardError::render(path, e))?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| DashboardError::render(path, e))?;
    draw(&root).map_err(|e| DashboardError::render(path, e))?;
    root.present().map_err(|e| DashboardError::render(path, e))?;

    log::debug!("Wrote chart {}", path.display());
    Ok(())
}

/// Draw the top and right frame lines around a plotting area when enabled.
///
/// Left and bottom are the mesh axes; see [`apply_axis_borders`].
pub(crate) fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot_pixels: (Range<i32>, Range<i32>),
    borders: &Borders,
    color: RGBColor,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let (xs, ys) = plot_pixels;
    let (left, right) = (xs.start, xs.end - 1);
    let (top, bottom) = (ys.start, ys.end - 1);

    if borders.top {
        root.draw(&PathElement::new(vec![(left, top), (right, top)], color))?;
    }
    if borders.right {
        root.draw(&PathElement::new(vec![(right, top), (right, bottom)], color))?;
    }
    Ok(())
}

/// Hide the mesh's bottom/left axis lines (and their ticks) when disabled.
pub(crate) fn apply_axis_borders<DB, X, Y>(
    mesh: &mut plotters::chart::MeshStyle<'_, '_, X, Y, DB>,
    borders: &Borders,
) where
    DB: DrawingBackend,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    if !borders.bottom {
        mesh.disable_x_axis();
    }
    if !borders.left {
        mesh.disable_y_axis();
    }
}

/// Label for a categorical axis drawn on an `f64` coordinate where category
/// `i` sits at `i`. Non-integer positions get no label.
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Upper bound for a count axis: a little headroom above the tallest bar.
pub(crate) fn count_axis_top(max_count: usize) -> f64 {
    ((max_count as f64) * 1.05).ceil().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integers() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 0.0), "A");
        assert_eq!(category_label(&labels, 1.0000000001), "B");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }

    #[test]
    fn count_axis_has_headroom() {
        assert_eq!(count_axis_top(0), 1.0);
        assert_eq!(count_axis_top(100), 105.0);
        assert_eq!(count_axis_top(6), 7.0);
    }

    #[test]
    fn bundled_font_registers() {
        assert!(ensure_font().is_ok());
        assert!(ensure_font().is_ok());
    }
}
