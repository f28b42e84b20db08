//! Error types raised while reconciling the blacklist.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a run.
///
/// `InputFormat` and `UnknownRename` are data-entry problems in the changelog
/// (or spreadsheet seed) and are always fatal: nothing is saved when either is
/// returned.
#[derive(Debug, Error)]
pub enum BlacklistError {
    #[error("unable to process non-blank line {line_number} in input:\n{line}")]
    InputFormat { line_number: usize, line: String },

    #[error(
        "you asked us to update usernames from {old} to {new}, but {old} isn't in the blacklist. \
         Please submit this as a new entry instead"
    )]
    UnknownRename { old: String, new: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BlacklistError {
    pub fn input_format(line_number: usize, line: impl Into<String>) -> Self {
        BlacklistError::InputFormat {
            line_number,
            line: line.into(),
        }
    }

    /// True for errors caused by the human-edited input rather than the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BlacklistError::InputFormat { .. } | BlacklistError::UnknownRename { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BlacklistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_reports_line_verbatim() {
        let err = BlacklistError::input_format(3, "  Lonely  ");
        let message = err.to_string();

        assert!(message.contains("line 3"));
        assert!(message.contains("  Lonely  "));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unknown_rename_reports_both_names() {
        let err = BlacklistError::UnknownRename {
            old: "Ghost".to_string(),
            new: "Phantom".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("Ghost"));
        assert!(message.contains("Phantom"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let err = BlacklistError::Io {
            path: PathBuf::from("blacklist/blacklist.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(!err.is_input_error());
        assert!(err.to_string().contains("blacklist/blacklist.json"));
    }
}
