//! Output formatters for refresh results

use anyhow::Result;
use colored::*;
use sheetio_core::ExportReport;
use std::path::Path;

/// Print the refresh summary in human-readable format with colors
pub fn print_human(file_path: &Path, report: &ExportReport, applied: usize, dry_run: bool) {
    println!("{}", format!("Refreshing from: {}", file_path.display()).bold());
    println!();

    for cell in &report.cells {
        let status = match cell.value.as_deref() {
            None => "MISS".red().bold(),
            Some("") => "EMPTY".yellow().bold(),
            Some(_) => "OK".green().bold(),
        };
        println!(
            "  {:<5} {:<8} -> {}",
            status,
            cell.key.to_string().cyan(),
            cell.path.display().to_string().bright_black()
        );
    }
    println!();

    let missed = report.missed().len();
    let empty = report.empty().len();

    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Configured:".bold(), report.cells.len());
    println!("  {} {}", "Updated:".green().bold(), applied);
    if empty > 0 {
        println!("  {} {}", "Empty:".yellow().bold(), empty);
    }
    if missed > 0 {
        println!("  {} {}", "Missed:".red().bold(), missed);
    }
    if dry_run {
        println!("{}", "[DRY RUN] No files were written".yellow());
    }
}

/// Print the refresh summary in JSON format
pub fn print_json(file_path: &Path, report: &ExportReport, applied: usize, dry_run: bool) -> Result<()> {
    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "dry_run": dry_run,
        "cells": report.cells,
        "summary": {
            "configured": report.cells.len(),
            "updated": applied,
            "empty": report.empty().len(),
            "missed": report.missed().len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
