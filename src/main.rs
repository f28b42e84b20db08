use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use blacklist_builder::{init_logging, run_build, Config, EmbedKind};

#[derive(Parser)]
#[command(
    name = "build-blacklist",
    version,
    about = "Apply the blacklist changelog and regenerate the announcement embeds"
)]
struct Cli {
    /// Config file (defaults to ./blacklist.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Changelog of directives
    #[arg(long)]
    input: Option<PathBuf>,

    /// Persisted blacklist JSON
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output directory for the embeds
    #[arg(long)]
    embeds_dir: Option<PathBuf>,

    /// Reconcile and build, but write nothing; prints the new-entries embed
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(data) = cli.data {
        config.data = data;
    }
    if let Some(embeds_dir) = cli.embeds_dir {
        config.embeds_dir = embeds_dir;
    }

    println!("🚫 Blacklist update");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let outcome = run_build(&config, cli.dry_run).map_err(|err| {
        let hint = if err.is_input_error() {
            format!("fix {} and run again", config.input.display())
        } else {
            "check the file paths and permissions".to_string()
        };
        let message = format!(
            "Blacklist update aborted, {} was not modified; {}",
            config.data.display(),
            hint
        );
        anyhow::Error::new(err).context(message)
    })?;

    println!("✓ {}", outcome.report.summary());

    if cli.dry_run {
        if let Some((_, embed)) = outcome.embeds.iter().find(|(kind, _)| *kind == EmbedKind::New) {
            println!("\n{}", embed.description);
        }
        println!("\n(dry run: nothing written)");
    } else {
        println!("✓ Saved {} entries to {}", outcome.registry.len(), config.data.display());
        for path in &outcome.written {
            println!("✓ Wrote {}", path.display());
        }
    }

    Ok(())
}
