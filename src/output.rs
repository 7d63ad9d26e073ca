use std::path::Path;

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Output directory
// ---------------------------------------------------------------------------

/// Create `dir` and any missing parents. An existing directory is not an error.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        log::debug!("Output directory {} already exists", dir.display());
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| DashboardError::io(dir, e))?;
    log::info!("Created output directory {}", dir.display());
    Ok(())
}
