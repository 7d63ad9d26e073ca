use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// DashboardError – every failure the pipeline can surface
// ---------------------------------------------------------------------------

/// Errors raised while building the dashboard.
///
/// Each variant names the file involved so a failed run can be diagnosed
/// from the message alone.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Input file absent, unreadable, malformed or of an unsupported format.
    #[error("Failed to read data source {path}: {message}")]
    DataSource { path: PathBuf, message: String },

    /// A required column is missing from the input header.
    #[error("Data source {path} is missing required column '{column}'")]
    Schema { path: PathBuf, column: &'static str },

    /// A chart could not be drawn or encoded.
    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    /// Directory creation or page write failure.
    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DashboardError {
    pub(crate) fn data_source(path: &Path, message: impl Into<String>) -> Self {
        Self::DataSource {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn render(path: &Path, message: impl ToString) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Short stage name used in log lines.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::DataSource { .. } | Self::Schema { .. } => "load",
            Self::Render { .. } => "render",
            Self::Io { .. } => "write",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_column_and_file() {
        let err = DashboardError::Schema {
            path: PathBuf::from("shipping.csv"),
            column: "Customer_rating",
        };
        let msg = err.to_string();
        assert!(msg.contains("shipping.csv"));
        assert!(msg.contains("Customer_rating"));
        assert_eq!(err.stage(), "load");
    }

    #[test]
    fn io_error_keeps_source() {
        let err = DashboardError::io(
            Path::new("docs"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("docs"));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("denied"));
        assert_eq!(err.stage(), "write");
    }

    #[test]
    fn render_error_stage() {
        let err = DashboardError::render(Path::new("docs/a.png"), "backend failed");
        assert!(err.to_string().contains("backend failed"));
        assert_eq!(err.stage(), "render");
    }
}
