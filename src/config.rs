//! File locations for a run.
//!
//! Layered, lowest priority first: built-in defaults, `blacklist.toml` in the
//! working directory (or the file passed with `--config`), `BLACKLIST_*`
//! environment variables. The binaries apply CLI flags on top.

use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
input      = "blacklist.txt"
data       = "blacklist/blacklist.json"
embeds_dir = "blacklist/embeds"
sheet      = "blacklist_from_sheets.txt"
"#;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "blacklist.toml";

/// Prefix for environment overrides, e.g. `BLACKLIST_EMBEDS_DIR`
pub const ENV_PREFIX: &str = "BLACKLIST";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Changelog of directives
    pub input: PathBuf,
    /// Persisted blacklist (JSON)
    pub data: PathBuf,
    /// Directory the embed documents are written to
    pub embeds_dir: PathBuf,
    /// Tab-separated spreadsheet export used by the seed import
    pub sheet: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. An explicit `path` must exist; the
    /// default `blacklist.toml` is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();

        assert_eq!(config.input, PathBuf::from("blacklist.txt"));
        assert_eq!(config.data, PathBuf::from("blacklist/blacklist.json"));
        assert_eq!(config.embeds_dir, PathBuf::from("blacklist/embeds"));
        assert_eq!(config.sheet, PathBuf::from("blacklist_from_sheets.txt"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "embeds_dir = \"out/embeds\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.embeds_dir, PathBuf::from("out/embeds"));
        assert_eq!(config.input, PathBuf::from("blacklist.txt"));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
