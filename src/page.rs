use std::fmt::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// File name of the dashboard page inside the output directory.
pub const PAGE_FILE: &str = "index.html";

const PAGE_TITLE: &str = "Shipping Dashboard Example";

// ---------------------------------------------------------------------------
// Chart file names shared by the renderer and the page
// ---------------------------------------------------------------------------

/// Relative file names of the four chart images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFiles {
    pub warehouse: String,
    pub shipment_mode: String,
    pub rating: String,
    pub weight: String,
}

impl Default for ChartFiles {
    fn default() -> Self {
        ChartFiles {
            warehouse: "shipping_per_warehouse.png".to_string(),
            shipment_mode: "mode_of_shipment.png".to_string(),
            rating: "average_customer_rating.png".to_string(),
            weight: "weight_distribution.png".to_string(),
        }
    }
}

impl ChartFiles {
    /// `(file, alt text)` in page order: warehouse and rating on the first
    /// row, shipment mode and weight on the second.
    fn page_order(&self) -> [(&str, &str); 4] {
        [
            (self.warehouse.as_str(), "Fig 1"),
            (self.rating.as_str(), "Fig 3"),
            (self.shipment_mode.as_str(), "Fig 2"),
            (self.weight.as_str(), "Fig 4"),
        ]
    }
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Build the dashboard page: a heading and the four images in a wrapping
/// two-column flex layout. Uses inline styles only.
pub fn render_page(files: &ChartFiles) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{PAGE_TITLE}</title>
</head>
<body>
    <h1>{PAGE_TITLE}</h1>
    <div style="max-width: 1200px; margin: 0 auto;">
        <div style="display: flex; flex-wrap: wrap; justify-content: space-around;">"#
    );

    for (file, alt) in files.page_order() {
        let _ = writeln!(
            output,
            r#"            <div style="width: 45%; min-width: 300px; margin-bottom: 20px;">
                <img src="{}" alt="{alt}" style="width: 100%; height: auto; border-radius: 8px;" />
            </div>"#,
            html_escape(file)
        );
    }

    output.push_str("        </div>\n    </div>\n</body>\n</html>\n");
    output
}

/// Write [`render_page`] to `index.html` in `output_dir`, replacing any
/// existing page. Returns the path written.
pub fn write_page(output_dir: &Path, files: &ChartFiles) -> Result<PathBuf> {
    let path = output_dir.join(PAGE_FILE);
    std::fs::write(&path, render_page(files)).map_err(|e| DashboardError::io(&path, e))?;
    log::debug!("Wrote page {}", path.display());
    Ok(path)
}
