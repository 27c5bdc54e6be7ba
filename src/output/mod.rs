// Output: terminal display and report files.

pub mod terminal;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::report::Report;

/// Write `report` as a PDF into `dir`, creating the directory if needed.
/// Returns the path written.
pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(&report.filename);
    std::fs::write(&path, report.to_pdf())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), pages = report.document.pages().len(), "Report written");
    Ok(path)
}
