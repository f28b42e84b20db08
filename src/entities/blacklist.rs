// 🚫 Blacklist Entity - Usernames with stable case-insensitive identity
//
// The username is both the display value and the identity. Identity is
// compared case-insensitively, so "Alice" and "ALICE" are the same entry and
// the first-seen casing is what gets displayed. Renames change the username
// in place; entries are never deleted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{BlacklistError, Result};

// ============================================================================
// BLACKLIST ENTRY
// ============================================================================

/// One blacklisted user, exactly as persisted in `blacklist.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub username: String,
    pub category: String,
}

impl BlacklistEntry {
    pub fn new(username: impl Into<String>, category: impl Into<String>) -> Self {
        BlacklistEntry {
            username: username.into(),
            category: category.into(),
        }
    }

    /// Case-insensitive identity check
    pub fn is_named(&self, username: &str) -> bool {
        same_username(&self.username, username)
    }
}

/// Usernames are compared ignoring case.
pub fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

// ============================================================================
// BLACKLIST REGISTRY
// ============================================================================

/// The in-memory blacklist.
///
/// Holds exactly one entry per case-insensitive username, in insertion order
/// (which is also the order they are saved in).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlacklistRegistry {
    entries: Vec<BlacklistEntry>,
}

impl BlacklistRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        BlacklistRegistry {
            entries: Vec::new(),
        }
    }

    /// Build a registry from persisted records.
    ///
    /// A hand-edited file can contain the same name twice; duplicates are
    /// folded with upsert semantics so the one-entry-per-name invariant holds.
    pub fn from_entries(entries: impl IntoIterator<Item = BlacklistEntry>) -> Self {
        let mut registry = BlacklistRegistry::new();
        for entry in entries {
            if registry.lookup(&entry.username).is_some() {
                warn!(username = %entry.username, "duplicate username in persisted blacklist, merging");
            }
            registry.upsert(&entry.username, &entry.category);
        }
        registry
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.is_named(username))
    }

    /// Find entry by username (case-insensitive)
    pub fn lookup(&self, username: &str) -> Option<&BlacklistEntry> {
        self.position(username).map(|i| &self.entries[i])
    }

    /// Overwrite the category of an existing entry, or append a new one.
    pub fn upsert(&mut self, username: &str, category: &str) -> &BlacklistEntry {
        match self.position(username) {
            Some(i) => {
                let entry = &mut self.entries[i];
                if entry.category != category {
                    debug!(username = %entry.username, from = %entry.category, to = %category, "recategorized");
                }
                entry.category = category.to_string();
                &self.entries[i]
            }
            None => {
                debug!(%username, %category, "added");
                self.entries.push(BlacklistEntry::new(username, category));
                &self.entries[self.entries.len() - 1]
            }
        }
    }

    /// Rename `old` to `new`.
    ///
    /// If `new` is already present the rename was applied on an earlier run
    /// and the existing entry is returned untouched. Renaming a name that was
    /// never recorded fails and leaves the registry unchanged.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<&BlacklistEntry> {
        if let Some(i) = self.position(new) {
            debug!(%old, %new, "rename already applied");
            return Ok(&self.entries[i]);
        }

        if let Some(i) = self.position(old) {
            debug!(%old, %new, "renamed");
            self.entries[i].username = new.to_string();
            return Ok(&self.entries[i]);
        }

        Err(BlacklistError::UnknownRename {
            old: old.to_string(),
            new: new.to_string(),
        })
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[BlacklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose category matches exactly
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a BlacklistEntry> + 'a {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Number of entries per raw category string
    pub fn count_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(entries: &[(&str, &str)]) -> BlacklistRegistry {
        BlacklistRegistry::from_entries(
            entries
                .iter()
                .map(|(username, category)| BlacklistEntry::new(*username, *category)),
        )
    }

    #[test]
    fn test_upsert_creates_entry() {
        let mut registry = BlacklistRegistry::new();
        let entry = registry.upsert("Alice", "Scam").clone();

        assert_eq!(entry, BlacklistEntry::new("Alice", "Scam"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_upsert_is_case_insensitive_and_keeps_first_casing() {
        let mut registry = BlacklistRegistry::new();
        registry.upsert("Alice", "Scam");
        registry.upsert("ALICE", "RMT");

        assert_eq!(registry.entries(), &[BlacklistEntry::new("Alice", "RMT")]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = registry_with(&[("Some Player", "Other")]);

        assert!(registry.lookup("some player").is_some());
        assert!(registry.lookup("SOME PLAYER").is_some());
        assert!(registry.lookup("some").is_none());
    }

    #[test]
    fn test_rename_mutates_in_place() {
        let mut registry = registry_with(&[("Bob", "Scam"), ("Carol", "RMT")]);
        let renamed = registry.rename("bob", "Robert").unwrap().clone();

        assert_eq!(renamed, BlacklistEntry::new("Robert", "Scam"));
        assert_eq!(registry.entries()[0], BlacklistEntry::new("Robert", "Scam"));
        assert!(registry.lookup("Bob").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_rename_is_idempotent() {
        let mut once = registry_with(&[("Bob", "Scam")]);
        once.rename("Bob", "Robert").unwrap();

        let mut twice = once.clone();
        let entry = twice.rename("Bob", "Robert").unwrap().clone();

        assert_eq!(entry, BlacklistEntry::new("Robert", "Scam"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rename_prefers_existing_new_name() {
        // Both names present: nothing changes, the existing target is returned
        let mut registry = registry_with(&[("Bob", "Scam"), ("Robert", "RMT")]);
        let before = registry.clone();
        let entry = registry.rename("Bob", "robert").unwrap().clone();

        assert_eq!(entry, BlacklistEntry::new("Robert", "RMT"));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_rename_unknown_fails_without_mutation() {
        let mut registry = registry_with(&[("Alice", "Scam")]);
        let before = registry.clone();

        let err = registry.rename("Ghost", "Phantom").unwrap_err();

        match err {
            BlacklistError::UnknownRename { old, new } => {
                assert_eq!(old, "Ghost");
                assert_eq!(new, "Phantom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry, before);
    }

    #[test]
    fn test_from_entries_folds_duplicates() {
        let registry = registry_with(&[("Dave", "Scam"), ("dave", "Other"), ("Eve", "RMT")]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("DAVE").unwrap(), &BlacklistEntry::new("Dave", "Other"));
    }

    #[test]
    fn test_by_category_and_counts() {
        let registry = registry_with(&[("A", "RMT"), ("B", "Scam"), ("C", "RMT")]);

        let rmt: Vec<&str> = registry.by_category("RMT").map(|e| e.username.as_str()).collect();
        assert_eq!(rmt, vec!["A", "C"]);

        let counts = registry.count_by_category();
        assert_eq!(counts.get("RMT"), Some(&2));
        assert_eq!(counts.get("Scam"), Some(&1));
        assert_eq!(counts.get("Other"), None);
    }
}
