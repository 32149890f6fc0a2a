//! Raw cell feed from a local Excel/ODS workbook using calamine

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;

mod grid;

pub use grid::{Grid, grid_to_raw};

/// Read one worksheet into a row-major grid of display strings
///
/// `sheet` selects a worksheet by name; `None` picks the first one. The grid
/// starts at A1 even when the sheet's used range does not.
pub fn read_grid<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Grid> {
    let path = path.as_ref();
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                anyhow::bail!(
                    "Sheet '{}' not found in {} (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                );
            }
            name.to_string()
        }
        None => {
            let first = sheet_names
                .first()
                .with_context(|| format!("Workbook has no sheets: {}", path.display()))?;
            log::debug!("No sheet configured, reading first sheet '{}'", first);
            first.clone()
        }
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let grid = range_to_grid(&range);
    log::info!(
        "Read {} rows from sheet '{}' of {}",
        grid.len(),
        sheet_name,
        path.display()
    );
    Ok(grid)
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    let mut grid = Grid::new();
    let Some((start_row, start_col)) = range.start() else {
        return grid;
    };

    for (rel_row, rel_col, data) in range.used_cells() {
        let row = start_row as usize + rel_row;
        let col = start_col as usize + rel_col;

        if grid.len() <= row {
            grid.resize_with(row + 1, Vec::new);
        }
        let cells = &mut grid[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = cell_text(data);
    }

    grid
}

/// Display text of a cell value, as a spreadsheet would show it unformatted
fn cell_text(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::String(s) => s.clone(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
        Data::DateTime(dt) => float_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
