//! Configuration: which cells to watch and where their values go

use crate::cell::CellKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetio.toml";

/// A configured cell and the file its value is exported to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellTarget {
    pub key: CellKey,
    pub file_name: String,
}

impl CellTarget {
    pub fn new(key: CellKey, file_name: impl Into<String>) -> Self {
        Self {
            key,
            file_name: file_name.into(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Directory output files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Worksheet to read; the first sheet when unset
    #[serde(default)]
    pub sheet: Option<String>,
    /// Wrap exported values in the HTML template
    #[serde(default)]
    pub html: bool,
    /// Cell reference -> output file name
    #[serde(default)]
    pub cells: BTreeMap<String, String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sheet: None,
            html: false,
            cells: BTreeMap::new(),
        }
    }
}

impl SheetConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(content)?;
        config.targets()?;
        Ok(config)
    }

    /// Resolve `[cells]` into targets, in row-major order
    ///
    /// Fails on a malformed reference, an empty file name, or two references
    /// that name the same cell (e.g. `a1` and `A1`).
    pub fn targets(&self) -> Result<Vec<CellTarget>> {
        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(self.cells.len());

        for (reference, file_name) in &self.cells {
            let key = CellKey::from_reference(reference)
                .with_context(|| format!("Configuration error: bad cell '{}'", reference))?;
            if file_name.trim().is_empty() {
                anyhow::bail!(
                    "Configuration error: cell '{}' has an empty output file name",
                    reference
                );
            }
            if !seen.insert(key) {
                anyhow::bail!(
                    "Configuration error: cell '{}' is configured more than once (as {})",
                    reference,
                    key
                );
            }
            targets.push(CellTarget::new(key, file_name.clone()));
        }

        targets.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(targets)
    }
}
