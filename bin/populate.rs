// Blacklist Builder - Spreadsheet seed import
// One-time bulk population from a username<TAB>category export

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use blacklist_builder::{init_logging, run_populate, Config};

#[derive(Parser)]
#[command(
    name = "populate-blacklist",
    version,
    about = "Seed the persisted blacklist from a tab-separated spreadsheet export"
)]
struct Cli {
    /// Config file (defaults to ./blacklist.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tab-separated username/category export
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Persisted blacklist JSON
    #[arg(long)]
    data: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(sheet) = cli.sheet {
        config.sheet = sheet;
    }
    if let Some(data) = cli.data {
        config.data = data;
    }

    println!("📂 Importing {}", config.sheet.display());

    let (count, registry) = run_populate(&config).map_err(|err| {
        let hint = if err.is_input_error() {
            format!("fix {} and run again", config.sheet.display())
        } else {
            "check the file paths and permissions".to_string()
        };
        let message = format!("Import aborted, {} was not modified; {}", config.data.display(), hint);
        anyhow::Error::new(err).context(message)
    })?;

    println!("✓ Applied {} rows", count);
    println!("✓ Saved {} entries to {}", registry.len(), config.data.display());
    for (category, n) in registry.count_by_category() {
        println!("   {:<12} {}", category, n);
    }

    Ok(())
}
