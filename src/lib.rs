//! Static shipping dashboard.
//!
//! Loads a table of shipment records, reduces it to four views (records per
//! warehouse, shipment mode shares, rating range per mode, weight
//! distribution), renders each view to a PNG and writes an `index.html`
//! arranging the images.

pub mod color;
pub mod data;
pub mod error;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod style;

pub use error::{DashboardError, Result};
pub use pipeline::{run, DashboardConfig, DashboardReport};
