use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::aggregate::{
    count_by_warehouse, proportion_by_shipment_mode, rating_range_by_mode, weight_histogram,
    DEFAULT_BIN_COUNT,
};
use crate::data::loader::load_file;
use crate::error::Result;
use crate::output::ensure_directory;
use crate::page::{write_page, ChartFiles};
use crate::render::{render_bar_chart, render_donut_chart, render_histogram, render_range_chart};
use crate::style::DashboardStyles;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything a dashboard run needs. `Default` gives the fixed layout:
/// `files/input/shipping-data.csv` in, `docs/` out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub bin_count: usize,
    pub files: ChartFiles,
    pub styles: DashboardStyles,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            input_path: PathBuf::from("files/input/shipping-data.csv"),
            output_dir: PathBuf::from("docs"),
            bin_count: DEFAULT_BIN_COUNT,
            files: ChartFiles::default(),
            styles: DashboardStyles::default(),
        }
    }
}

impl DashboardConfig {
    /// Default styles and names with explicit input and output locations.
    pub fn with_paths(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        DashboardConfig {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..DashboardConfig::default()
        }
    }

    fn chart_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    /// Number of records loaded.
    pub records: usize,
    /// Chart images in the order they were written.
    pub charts: Vec<PathBuf>,
    pub page: PathBuf,
}

/// Load the data, render the four charts and write the page.
///
/// The input is loaded before the output directory is touched, so an
/// unreadable or incomplete source leaves no files behind. The first failure
/// aborts the run; charts written before it are left in place.
pub fn run(config: &DashboardConfig) -> Result<DashboardReport> {
    let dataset = load_file(&config.input_path)?;

    ensure_directory(&config.output_dir)?;

    let styles = &config.styles;
    let files = &config.files;
    let mut charts = Vec::with_capacity(4);

    let path = config.chart_path(&files.warehouse);
    render_bar_chart(&count_by_warehouse(&dataset), &styles.bar, &path)?;
    charts.push(path);

    let path = config.chart_path(&files.shipment_mode);
    render_donut_chart(&proportion_by_shipment_mode(&dataset), &styles.donut, &path)?;
    charts.push(path);

    let path = config.chart_path(&files.rating);
    render_range_chart(&rating_range_by_mode(&dataset), &styles.range, &path)?;
    charts.push(path);

    let path = config.chart_path(&files.weight);
    render_histogram(&weight_histogram(&dataset, config.bin_count), &styles.histogram, &path)?;
    charts.push(path);

    let page = write_page(&config.output_dir, files)?;

    log::info!(
        "Dashboard for {} records written to {}",
        dataset.len(),
        display_dir(&config.output_dir)
    );

    Ok(DashboardReport {
        records: dataset.len(),
        charts,
        page,
    })
}

fn display_dir(dir: &Path) -> String {
    if dir.as_os_str().is_empty() {
        ".".to_string()
    } else {
        dir.display().to_string()
    }
}
