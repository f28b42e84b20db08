// Blacklist Builder - Core Library
// Exposes all modules for use in the two binaries and tests

pub mod config;
pub mod db;
pub mod embeds;
pub mod entities;
pub mod error;
pub mod parser;
pub mod reconciliation;
pub mod run;

// Re-export commonly used types
pub use config::Config;
pub use db::{load_blacklist, read_lines, save_blacklist, write_embed, write_embeds};
pub use embeds::{
    build_all, build_embed, format_username, BlockMode, Embed, EmbedKind, Emphasis,
};
pub use entities::{BlacklistEntry, BlacklistRegistry, CategoryType};
pub use error::{BlacklistError, Result};
pub use parser::{
    parse_directive, parse_sheet, parse_sheet_reader, ChangelogParser, Directive, Epoch,
};
pub use reconciliation::{
    EpochCounts, EpochUpdates, ReconciliationReport, UpdateEntry, UpdateReconciler,
};
pub use run::{run_build, run_populate, BuildOutcome};

/// Install the fmt subscriber used by both binaries.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
