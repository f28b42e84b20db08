// 🔁 Run - One full update cycle
//
// load → apply changelog in memory → save → build embeds → write embeds
//
// Nothing is written until the whole changelog has been applied, so any
// InputFormat / UnknownRename error leaves blacklist.json untouched.

use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::db::{load_blacklist, read_lines, save_blacklist, write_embeds};
use crate::embeds::{build_all, Embed, EmbedKind};
use crate::entities::BlacklistRegistry;
use crate::error::Result;
use crate::parser::parse_sheet;
use crate::reconciliation::{EpochUpdates, ReconciliationReport, UpdateReconciler};

/// Result of a changelog-driven run
#[derive(Debug)]
pub struct BuildOutcome {
    pub report: ReconciliationReport,
    pub registry: BlacklistRegistry,
    pub updates: EpochUpdates,
    pub embeds: Vec<(EmbedKind, Embed)>,
    /// Empty on a dry run
    pub written: Vec<PathBuf>,
}

/// Reconcile the changelog and regenerate every embed.
///
/// With `dry_run` nothing is written to disk.
pub fn run_build(config: &Config, dry_run: bool) -> Result<BuildOutcome> {
    let registry = load_blacklist(&config.data)?;
    let lines = read_lines(&config.input)?;
    info!(
        entries = registry.len(),
        lines = lines.len(),
        input = %config.input.display(),
        "starting update"
    );

    let mut reconciler = UpdateReconciler::new(registry);
    let report = reconciler.apply_changelog(&lines)?.clone();
    let (registry, updates) = reconciler.into_parts();

    let embeds = build_all(&registry, &updates);

    let written = if dry_run {
        info!("dry run, nothing written");
        Vec::new()
    } else {
        save_blacklist(&config.data, &registry)?;
        write_embeds(&config.embeds_dir, &embeds)?
    };

    Ok(BuildOutcome {
        report,
        registry,
        updates,
        embeds,
        written,
    })
}

/// Seed the blacklist from a spreadsheet export. Returns the number of rows applied.
pub fn run_populate(config: &Config) -> Result<(usize, BlacklistRegistry)> {
    let registry = load_blacklist(&config.data)?;
    let rows = parse_sheet(&config.sheet)?;

    let mut reconciler = UpdateReconciler::new(registry);
    let count = reconciler.seed(rows);
    let (registry, _) = reconciler.into_parts();

    save_blacklist(&config.data, &registry)?;
    Ok((count, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BlacklistEntry;
    use crate::error::BlacklistError;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            input: dir.path().join("blacklist.txt"),
            data: dir.path().join("blacklist").join("blacklist.json"),
            embeds_dir: dir.path().join("blacklist").join("embeds"),
            sheet: dir.path().join("blacklist_from_sheets.txt"),
        }
    }

    fn seed_data(config: &Config, entries: Vec<BlacklistEntry>) {
        save_blacklist(&config.data, &BlacklistRegistry::from_entries(entries)).unwrap();
    }

    #[test]
    fn test_full_run_writes_everything() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        seed_data(&config, vec![BlacklistEntry::new("Bob", "Scam")]);
        fs::write(&config.input, "Bob Scam\n# Previous updates\nCarol RMT\nBob -> Robert\n").unwrap();

        let outcome = run_build(&config, false).unwrap();

        assert_eq!(outcome.written.len(), 7);
        let reloaded = load_blacklist(&config.data).unwrap();
        assert_eq!(reloaded, outcome.registry);
        assert!(reloaded.lookup("Robert").is_some());
        assert!(reloaded.lookup("Carol").is_some());

        let rmta = fs::read_to_string(config.embeds_dir.join("rmta.txt")).unwrap();
        assert!(rmta.contains("*Carol*"));
    }

    #[test]
    fn test_empty_changelog_still_saves() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(config.data.parent().unwrap()).unwrap();
        fs::write(&config.data, r#"[ {"username": "Alice", "category": "Scam"} ]"#).unwrap();
        fs::write(&config.input, "").unwrap();

        run_build(&config, false).unwrap();

        // Rewritten in normalized form
        assert_eq!(
            fs::read_to_string(&config.data).unwrap(),
            r#"[{"username":"Alice","category":"Scam"}]"#
        );
    }

    #[test]
    fn test_failed_run_leaves_data_untouched() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        seed_data(&config, vec![BlacklistEntry::new("Alice", "Scam")]);
        let before = fs::read_to_string(&config.data).unwrap();
        fs::write(&config.input, "Dave Other\nGhost -> Phantom\n").unwrap();

        let err = run_build(&config, false).unwrap_err();

        assert!(matches!(err, BlacklistError::UnknownRename { .. }));
        assert_eq!(fs::read_to_string(&config.data).unwrap(), before);
        assert!(!config.embeds_dir.exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.input, "Alice Scam\n").unwrap();

        let outcome = run_build(&config, true).unwrap();

        assert!(outcome.written.is_empty());
        assert_eq!(outcome.embeds.len(), 7);
        assert!(!config.data.exists());
    }

    #[test]
    fn test_populate_from_sheet() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        seed_data(&config, vec![BlacklistEntry::new("Alice", "Scam")]);
        fs::write(&config.sheet, "ALICE\tRMT\nSome Player\tUnknown\n").unwrap();

        let (count, registry) = run_populate(&config).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            registry.entries(),
            &[
                BlacklistEntry::new("Alice", "RMT"),
                BlacklistEntry::new("Some Player", "Unknown"),
            ]
        );
        assert_eq!(load_blacklist(&config.data).unwrap(), registry);
    }

    #[test]
    fn test_populate_bad_row_saves_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.sheet, "Alice\tScam\nbroken\n").unwrap();

        let err = run_populate(&config).unwrap_err();

        assert!(matches!(err, BlacklistError::InputFormat { .. }));
        assert!(!config.data.exists());
    }
}
