use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetio_core::config::DEFAULT_CONFIG_FILE;
use sheetio_core::{SheetConfig, SheetIo};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetio")]
#[command(about = "Export configured spreadsheet cells to text or HTML files", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file to read
    #[arg(value_name = "WORKBOOK")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory to write output files to (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Worksheet to read (overrides config)
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Wrap values in the HTML page template
    #[arg(long)]
    html: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Show what would be written without writing files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        SheetConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_config_path.exists() {
            SheetConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            anyhow::bail!(
                "No configuration found. Pass --config or create {} in the current directory.",
                DEFAULT_CONFIG_FILE
            );
        }
    };

    // Command line overrides
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(sheet) = cli.sheet {
        config.sheet = Some(sheet);
    }
    if cli.html {
        config.html = true;
    }

    let session = SheetIo::with_config(config).context("Invalid configuration")?;

    let applied = session
        .refresh_from_file(&cli.file)
        .with_context(|| format!("Failed to read workbook: {}", cli.file.display()))?;

    let output_dir = session.config().output_dir.clone();
    let report = if cli.dry_run {
        session.plan(&output_dir)
    } else {
        session.export(&output_dir)?
    };

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&cli.file, &report, applied, cli.dry_run);
        }
        OutputFormat::Json => {
            formatter::print_json(&cli.file, &report, applied, cli.dry_run)?;
        }
    }

    // Non-zero when any configured cell missed the cache
    let exit_code = if report.missed().is_empty() { 0 } else { 1 };
    std::process::exit(exit_code);
}
