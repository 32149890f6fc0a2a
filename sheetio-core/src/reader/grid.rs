//! Grid to cell-keyed mapping translation

use crate::cell::CellKey;
use std::collections::HashMap;

/// Row-major grid of cell text; `grid[row][column]`, both zero-based
pub type Grid = Vec<Vec<String>>;

/// Key every cell of `grid` by its coordinate
///
/// Empty strings are kept: they are real values for the cache, distinct from
/// a cell that is absent from the grid.
pub fn grid_to_raw(grid: &Grid) -> HashMap<CellKey, String> {
    let mut raw = HashMap::new();

    for (row, cells) in grid.iter().enumerate() {
        for (column, value) in cells.iter().enumerate() {
            match CellKey::from_coordinate(column as i64, row as i64) {
                Ok(key) => {
                    raw.insert(key, value.clone());
                }
                Err(e) => log::warn!("Skipping cell outside addressable range: {}", e),
            }
        }
    }

    raw
}
