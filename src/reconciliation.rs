// ⚖️ Update Reconciler - Apply changelog directives to the blacklist
//
// Replays the whole changelog against the persisted blacklist and records,
// per epoch, what each directive did. The epoch lists are rebuilt on every
// run and only drive the generated documents; they are never persisted.
//
// Everything happens in memory. The caller saves the registry only after
// apply_changelog() returned Ok, so a bad line never leaves a half-applied
// blacklist on disk.

use tracing::{debug, info};

use crate::entities::{category_rank, same_username, BlacklistEntry, BlacklistRegistry};
use crate::error::Result;
use crate::parser::{ChangelogParser, Directive, Epoch};

// ============================================================================
// UPDATE ENTRY
// ============================================================================

/// What one directive did to one entry.
///
/// `renamed_from` is set for rename directives only; `username` is then the
/// new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEntry {
    pub username: String,
    pub category: String,
    pub renamed_from: Option<String>,
}

impl UpdateEntry {
    pub fn plain(entry: &BlacklistEntry) -> Self {
        UpdateEntry {
            username: entry.username.clone(),
            category: entry.category.clone(),
            renamed_from: None,
        }
    }

    pub fn renamed(entry: &BlacklistEntry, old: &str) -> Self {
        UpdateEntry {
            username: entry.username.clone(),
            category: entry.category.clone(),
            renamed_from: Some(old.to_string()),
        }
    }

    pub fn is_rename(&self) -> bool {
        self.renamed_from.is_some()
    }

    /// Category rank, with renames sorting just after plain entries of the
    /// same category.
    pub fn sort_key(&self) -> u32 {
        let rank = category_rank(&self.category);
        if self.is_rename() {
            rank + 10
        } else {
            rank
        }
    }

    /// Line used in the "new entries" document
    pub fn to_new_line(&self) -> String {
        match &self.renamed_from {
            Some(old) => format!("[ {}\t{} - Renamed from {} ]", self.username, self.category, old),
            None => format!("{}\t{}", self.username, self.category),
        }
    }
}

// ============================================================================
// EPOCH UPDATES
// ============================================================================

/// The two epoch lists, in changelog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochUpdates {
    pub current_update: Vec<UpdateEntry>,
    pub previous_update: Vec<UpdateEntry>,
}

impl EpochUpdates {
    pub fn new() -> Self {
        EpochUpdates::default()
    }

    pub fn push(&mut self, epoch: Epoch, update: UpdateEntry) {
        match epoch {
            Epoch::Current => self.current_update.push(update),
            Epoch::Previous => self.previous_update.push(update),
        }
    }

    pub fn list(&self, epoch: Epoch) -> &[UpdateEntry] {
        match epoch {
            Epoch::Current => &self.current_update,
            Epoch::Previous => &self.previous_update,
        }
    }

    pub fn lookup_current(&self, username: &str) -> Option<&UpdateEntry> {
        self.current_update.iter().find(|u| same_username(&u.username, username))
    }

    pub fn lookup_previous(&self, username: &str) -> Option<&UpdateEntry> {
        self.previous_update.iter().find(|u| same_username(&u.username, username))
    }

    pub fn is_empty(&self) -> bool {
        self.current_update.is_empty() && self.previous_update.is_empty()
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

/// Counts per epoch, for the run summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochCounts {
    pub added: usize,
    pub recategorized: usize,
    pub unchanged: usize,
    pub renamed: usize,
}

impl EpochCounts {
    pub fn total(&self) -> usize {
        self.added + self.recategorized + self.unchanged + self.renamed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    pub lines_read: usize,
    pub current: EpochCounts,
    pub previous: EpochCounts,
    pub blacklist_size: usize,
}

impl ReconciliationReport {
    fn counts_mut(&mut self, epoch: Epoch) -> &mut EpochCounts {
        match epoch {
            Epoch::Current => &mut self.current,
            Epoch::Previous => &mut self.previous,
        }
    }

    pub fn directives(&self) -> usize {
        self.current.total() + self.previous.total()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} directives (current: {} added, {} recategorized, {} renamed; \
             previous: {} added, {} recategorized, {} renamed), {} entries in blacklist",
            self.lines_read,
            self.directives(),
            self.current.added,
            self.current.recategorized,
            self.current.renamed,
            self.previous.added,
            self.previous.recategorized,
            self.previous.renamed,
            self.blacklist_size,
        )
    }
}

// ============================================================================
// UPDATE RECONCILER
// ============================================================================

pub struct UpdateReconciler {
    registry: BlacklistRegistry,
    updates: EpochUpdates,
    report: ReconciliationReport,
}

impl UpdateReconciler {
    pub fn new(registry: BlacklistRegistry) -> Self {
        let blacklist_size = registry.len();
        UpdateReconciler {
            registry,
            updates: EpochUpdates::new(),
            report: ReconciliationReport {
                blacklist_size,
                ..Default::default()
            },
        }
    }

    /// Apply one directive and record it in the given epoch.
    pub fn apply(&mut self, epoch: Epoch, directive: &Directive) -> Result<()> {
        match directive {
            Directive::Upsert { username, category } => {
                let counts = self.report.counts_mut(epoch);
                match self.registry.lookup(username) {
                    None => counts.added += 1,
                    Some(existing) if existing.category != *category => counts.recategorized += 1,
                    Some(_) => counts.unchanged += 1,
                }

                let entry = self.registry.upsert(username, category);
                self.updates.push(epoch, UpdateEntry::plain(entry));
            }
            Directive::Rename { old, new } => {
                let entry = self.registry.rename(old, new)?;
                let update = UpdateEntry::renamed(entry, old);
                self.report.counts_mut(epoch).renamed += 1;
                self.updates.push(epoch, update);
            }
            Directive::Marker { .. } | Directive::Blank => {}
        }

        self.report.blacklist_size = self.registry.len();
        Ok(())
    }

    /// Replay the whole changelog in file order. Stops at the first bad line.
    pub fn apply_changelog<I, S>(&mut self, lines: I) -> Result<&ReconciliationReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = ChangelogParser::new();

        for line in lines {
            if let Some((epoch, directive)) = parser.next_directive(line.as_ref())? {
                debug!(epoch = epoch.as_str(), ?directive, "applying");
                self.apply(epoch, &directive)?;
            }
        }

        self.report.lines_read = parser.line_number();
        info!(
            directives = self.report.directives(),
            current = self.updates.current_update.len(),
            previous = self.updates.previous_update.len(),
            "changelog applied"
        );
        Ok(&self.report)
    }

    /// Bulk import: add/recategorize only, nothing recorded in the epoch lists.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = BlacklistEntry>) -> usize {
        let mut count = 0;
        for entry in entries {
            self.registry.upsert(&entry.username, &entry.category);
            count += 1;
        }
        self.report.blacklist_size = self.registry.len();
        info!(count, blacklist_size = self.registry.len(), "seed entries applied");
        count
    }

    pub fn registry(&self) -> &BlacklistRegistry {
        &self.registry
    }

    pub fn updates(&self) -> &EpochUpdates {
        &self.updates
    }

    pub fn report(&self) -> &ReconciliationReport {
        &self.report
    }

    pub fn into_parts(self) -> (BlacklistRegistry, EpochUpdates) {
        (self.registry, self.updates)
    }
}
