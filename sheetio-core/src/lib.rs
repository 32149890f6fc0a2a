//! sheetio-core: cell-keyed value cache refreshed from spreadsheet data
//!
//! A fixed set of cells is registered up front; refreshing from a raw sheet
//! only updates those cells, and lookups tell "registered but empty" apart
//! from "never registered".

pub mod cache;
pub mod cell;
pub mod config;
pub mod error;
pub mod html;
pub mod reader;
pub mod writer;

use anyhow::Result;
use std::path::Path;

pub use cache::SheetCache;
pub use cell::CellKey;
pub use config::{CellTarget, SheetConfig};
pub use error::CellKeyError;
pub use writer::{ExportReport, OutputFormat};

/// One configured session: targets from the config and the cache they seed
pub struct SheetIo {
    config: SheetConfig,
    targets: Vec<CellTarget>,
    cache: SheetCache,
}

impl SheetIo {
    /// Validate `config` and seed the cache with its cells
    pub fn with_config(config: SheetConfig) -> Result<Self> {
        let targets = config.targets()?;
        let cache = SheetCache::new();
        cache.setup(targets.iter().map(|t| t.key));
        Ok(Self {
            config,
            targets,
            cache,
        })
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn targets(&self) -> &[CellTarget] {
        &self.targets
    }

    pub fn cache(&self) -> &SheetCache {
        &self.cache
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.config.html {
            OutputFormat::Html
        } else {
            OutputFormat::Text
        }
    }

    /// Apply a raw grid to the cache; returns how many registered cells it hit
    pub fn refresh_from_grid(&self, grid: &reader::Grid) -> usize {
        let applied = self.cache.update(reader::grid_to_raw(grid));
        log::info!(
            "Refreshed {} of {} configured cells",
            applied,
            self.targets.len()
        );
        applied
    }

    /// Read the configured sheet of `path` and apply it to the cache
    pub fn refresh_from_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let grid = reader::read_grid(path, self.config.sheet.as_deref())?;
        Ok(self.refresh_from_grid(&grid))
    }

    /// Resolve targets without writing anything
    pub fn plan(&self, output_dir: &Path) -> ExportReport {
        writer::plan(&self.cache, &self.targets, output_dir)
    }

    /// Write every target's value under `output_dir`
    pub fn export(&self, output_dir: &Path) -> Result<ExportReport> {
        writer::export(&self.cache, &self.targets, output_dir, self.output_format())
    }
}
