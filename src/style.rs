use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared chart style
// ---------------------------------------------------------------------------

/// Which sides of the plot frame are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Borders {
    /// Left and bottom only.
    pub const OPEN: Borders = Borders {
        top: false,
        right: false,
        bottom: true,
        left: true,
    };
}

impl Default for Borders {
    fn default() -> Self {
        Borders::OPEN
    }
}

/// Title, axis labels, frame and font settings common to every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tick and axis label size in pixels; the title is drawn larger.
    pub font_size: u32,
    pub borders: Borders,
    pub border_color: String,
    /// Canvas size in pixels.
    pub size: (u32, u32),
}

impl ChartStyle {
    pub fn titled(title: &str) -> Self {
        ChartStyle {
            title: title.to_string(),
            ..ChartStyle::default()
        }
    }

    pub fn with_axes(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn title_size(&self) -> u32 {
        self.font_size + self.font_size / 2
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            font_size: 14,
            borders: Borders::OPEN,
            border_color: "black".to_string(),
            size: (640, 480),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-chart styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    pub chart: ChartStyle,
    pub color: String,
}

impl Default for BarStyle {
    fn default() -> Self {
        let mut chart = ChartStyle::titled("Shipping per warehouse")
            .with_axes("Warehouse block", "Record count");
        chart.font_size = 11;
        BarStyle {
            chart,
            color: "tab:blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutStyle {
    pub chart: ChartStyle,
    /// Wedge colors, reused in order when there are more categories.
    pub colors: Vec<String>,
    /// Ring thickness as a fraction of the outer radius.
    pub ring_width: f64,
    /// Angle of the first wedge edge in degrees, counter-clockwise from 3 o'clock.
    pub start_angle: f64,
    /// Decimal places of the percentage labels.
    pub label_precision: usize,
}

impl Default for DonutStyle {
    fn default() -> Self {
        DonutStyle {
            chart: ChartStyle::titled("Mode of shipment"),
            colors: vec!["tab:blue".into(), "tab:orange".into(), "tab:green".into()],
            ring_width: 0.35,
            start_angle: 90.0,
            label_precision: 1,
        }
    }
}

/// Decides the mean-bar color of the rating range chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingThreshold(pub f64);

impl RatingThreshold {
    /// `true` when `mean` should use the "high" color.
    pub fn is_high(self, mean: f64) -> bool {
        mean >= self.0
    }
}

impl Default for RatingThreshold {
    fn default() -> Self {
        RatingThreshold(3.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeStyle {
    pub chart: ChartStyle,
    /// Background bar spanning `[min, max]`.
    pub range_color: String,
    pub range_opacity: f64,
    /// Bar thickness as a fraction of the row height.
    pub range_height: f64,
    /// Overlay bar spanning `[min, mean]`.
    pub mean_height: f64,
    pub high_color: String,
    pub low_color: String,
    pub threshold: RatingThreshold,
    /// The value axis is clamped to this interval.
    pub x_range: (f64, f64),
}

impl RangeStyle {
    /// Overlay color name for a group with the given mean.
    pub fn mean_color(&self, mean: f64) -> &str {
        if self.threshold.is_high(mean) {
            &self.high_color
        } else {
            &self.low_color
        }
    }
}

impl Default for RangeStyle {
    fn default() -> Self {
        let mut chart = ChartStyle::titled("Average Customer Rating");
        chart.border_color = "gray".to_string();
        RangeStyle {
            chart,
            range_color: "lightgray".to_string(),
            range_opacity: 0.8,
            range_height: 0.9,
            mean_height: 0.5,
            high_color: "tab:green".to_string(),
            low_color: "tab:orange".to_string(),
            threshold: RatingThreshold::default(),
            x_range: (0.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramStyle {
    pub chart: ChartStyle,
    pub fill_color: String,
    pub edge_color: String,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        HistogramStyle {
            chart: ChartStyle::titled("Shipped Weight Distribution")
                .with_axes("Weight (g)", "Frequency"),
            fill_color: "tab:orange".to_string(),
            edge_color: "white".to_string(),
        }
    }
}

/// Styles for all four dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStyles {
    pub bar: BarStyle,
    pub donut: DonutStyle,
    pub range: RangeStyle,
    pub histogram: HistogramStyle,
}
