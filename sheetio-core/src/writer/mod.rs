//! Writer for per-cell output files

use crate::cache::SheetCache;
use crate::cell::CellKey;
use crate::config::CellTarget;
use crate::html::HtmlBuilder;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// How a cell value is written to its file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The raw value
    #[default]
    Text,
    /// The value wrapped in the div page template
    Html,
}

/// Outcome of writing one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedCell {
    pub key: CellKey,
    pub path: PathBuf,
    /// `None` when the cache missed and an empty document was written
    pub value: Option<String>,
}

/// Summary of an export pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub cells: Vec<ExportedCell>,
}

impl ExportReport {
    /// Keys the cache had no entry for
    pub fn missed(&self) -> Vec<CellKey> {
        self.cells
            .iter()
            .filter(|c| c.value.is_none())
            .map(|c| c.key)
            .collect()
    }

    /// Keys registered but still holding an empty value
    pub fn empty(&self) -> Vec<CellKey> {
        self.cells
            .iter()
            .filter(|c| c.value.as_deref() == Some(""))
            .map(|c| c.key)
            .collect()
    }
}

/// Render one cached lookup in the requested format
pub fn render(value: Option<&str>, format: OutputFormat) -> String {
    match (format, value) {
        (OutputFormat::Text, value) => value.unwrap_or_default().to_string(),
        (OutputFormat::Html, Some(value)) => HtmlBuilder::new().div(value).build(),
        (OutputFormat::Html, None) => HtmlBuilder::new().empty().build(),
    }
}

/// Resolve every target against the cache without touching the filesystem
pub fn plan(cache: &SheetCache, targets: &[CellTarget], output_dir: &Path) -> ExportReport {
    let cells = targets
        .iter()
        .map(|target| ExportedCell {
            key: target.key,
            path: output_dir.join(&target.file_name),
            value: cache.get(&target.key),
        })
        .collect();
    ExportReport { cells }
}

/// Write the cached value of every target to `output_dir/<file_name>`
///
/// A miss still produces a (blank) file so consumers never read stale data.
pub fn export(
    cache: &SheetCache,
    targets: &[CellTarget],
    output_dir: &Path,
    format: OutputFormat,
) -> Result<ExportReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let report = plan(cache, targets, output_dir);
    for cell in &report.cells {
        if cell.value.is_none() {
            log::warn!("Cell {} is not in the cache, writing empty output", cell.key);
        }
        let contents = render(cell.value.as_deref(), format);
        fs::write(&cell.path, contents)
            .with_context(|| format!("Failed to write {}", cell.path.display()))?;
        log::debug!("Wrote {} to {}", cell.key, cell.path.display());
    }

    Ok(report)
}
