// 📝 Changelog Parser - Text lines → directives
//
// The changelog is edited by hand, one directive per line:
//
//   # Previous update          ← comment; "previous" switches the epoch
//   Some Player Scam           ← add or recategorize (last token = category)
//   OldName -> NewName         ← rename
//
// The spreadsheet seed is a separate, simpler format (username<TAB>category)
// parsed with the csv crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::entities::BlacklistEntry;
use crate::error::{BlacklistError, Result};

/// Separator between the old and new name in a rename line
pub const RENAME_SEPARATOR: &str = " -> ";

/// First character of a comment / section marker line
pub const COMMENT_MARKER: char = '#';

/// Keyword that moves every later directive into the previous epoch
pub const PREVIOUS_KEYWORD: &str = "previous";

// ============================================================================
// CORE TYPES
// ============================================================================

/// Which update cycle a directive belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Epoch {
    #[default]
    Current,
    Previous,
}

impl Epoch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Epoch::Current => "current",
            Epoch::Previous => "previous",
        }
    }
}

/// One classified changelog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Add a new entry or change the category of an existing one
    Upsert { username: String, category: String },

    /// Change the username of an existing entry
    Rename { old: String, new: String },

    /// Comment line; may switch the epoch marker
    Marker { switches_to_previous: bool },

    /// Empty or whitespace-only line
    Blank,
}

// ============================================================================
// LINE CLASSIFICATION
// ============================================================================

/// Classify a single changelog line.
///
/// `line_number` is 1-based and only used for error reporting; the error
/// carries the raw line verbatim.
pub fn parse_directive(line: &str, line_number: usize) -> Result<Directive> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Ok(Directive::Blank);
    }

    if trimmed.starts_with(COMMENT_MARKER) {
        return Ok(Directive::Marker {
            switches_to_previous: trimmed.to_lowercase().contains(PREVIOUS_KEYWORD),
        });
    }

    if trimmed.contains(RENAME_SEPARATOR) {
        let mut parts = trimmed.split(RENAME_SEPARATOR);
        return match (parts.next(), parts.next(), parts.next()) {
            (Some(old), Some(new), None) if !old.trim().is_empty() && !new.trim().is_empty() => {
                Ok(Directive::Rename {
                    old: old.trim().to_string(),
                    new: new.trim().to_string(),
                })
            }
            _ => Err(BlacklistError::input_format(line_number, line)),
        };
    }

    match split_last_token(trimmed) {
        Some((username, category)) => Ok(Directive::Upsert {
            username: username.to_string(),
            category: category.to_string(),
        }),
        None => Err(BlacklistError::input_format(line_number, line)),
    }
}

/// Split on the last run of whitespace: everything before is the username
/// (which may itself contain spaces), the final token is the category.
fn split_last_token(text: &str) -> Option<(&str, &str)> {
    let (idx, ch) = text.char_indices().rev().find(|(_, c)| c.is_whitespace())?;
    let username = text[..idx].trim_end();
    let category = &text[idx + ch.len_utf8()..];

    if username.is_empty() || category.is_empty() {
        return None;
    }
    Some((username, category))
}

// ============================================================================
// CHANGELOG PARSER (stateful)
// ============================================================================

/// Walks the changelog in order, tracking the epoch marker.
///
/// The marker starts at `Current` and, once a "previous" comment is seen,
/// stays at `Previous` for the rest of the input.
#[derive(Debug, Default)]
pub struct ChangelogParser {
    epoch: Epoch,
    line_number: usize,
}

impl ChangelogParser {
    pub fn new() -> Self {
        ChangelogParser::default()
    }

    /// Epoch that the next directive will be tagged with
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Feed the next line. Returns `None` for blank and marker lines.
    pub fn next_directive(&mut self, line: &str) -> Result<Option<(Epoch, Directive)>> {
        self.line_number += 1;

        match parse_directive(line, self.line_number)? {
            Directive::Blank => Ok(None),
            Directive::Marker { switches_to_previous } => {
                if switches_to_previous && self.epoch == Epoch::Current {
                    tracing::debug!(line = self.line_number, "switching to previous epoch");
                    self.epoch = Epoch::Previous;
                }
                Ok(None)
            }
            directive => Ok(Some((self.epoch, directive))),
        }
    }
}

// ============================================================================
// SPREADSHEET SEED PARSER
// ============================================================================

/// Parse a `username<TAB>category` export from a file.
pub fn parse_sheet(file_path: &Path) -> Result<Vec<BlacklistEntry>> {
    let file = File::open(file_path).map_err(|source| BlacklistError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    parse_sheet_reader(file, file_path)
}

/// Parse a `username<TAB>category` export.
///
/// The category is whatever follows the last tab, so usernames may contain
/// tabs. Blank lines are skipped; a line without a tab aborts the import.
/// `source` only labels errors.
pub fn parse_sheet_reader<R: Read>(reader: R, source: &Path) -> Result<Vec<BlacklistEntry>> {
    use csv::ReaderBuilder;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|err| BlacklistError::Csv {
            path: source.to_path_buf(),
            source: err,
        })?;
        let line_number = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let raw_line = record.iter().collect::<Vec<_>>().join("\t");
        let trimmed = raw_line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let (username, category) = match trimmed.rsplit_once('\t') {
            Some((username, category)) => (username.trim(), category.trim()),
            None => return Err(BlacklistError::input_format(line_number, raw_line)),
        };

        if username.is_empty() || category.is_empty() {
            return Err(BlacklistError::input_format(line_number, raw_line));
        }

        entries.push(BlacklistEntry::new(username, category));
    }

    Ok(entries)
}
