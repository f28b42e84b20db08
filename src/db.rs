// 💾 Persistence - blacklist.json, the changelog, and the embed files
//
// Thin adapter around the filesystem. The blacklist is a JSON array of
// {"username", "category"} records, fully rewritten on every save through a
// temp file + rename so an interrupted run never leaves a truncated file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::embeds::{Embed, EmbedKind};
use crate::entities::{BlacklistEntry, BlacklistRegistry};
use crate::error::{BlacklistError, Result};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BlacklistError + '_ {
    move |source| BlacklistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> BlacklistError + '_ {
    move |source| BlacklistError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Load the persisted blacklist. A missing file is an empty blacklist.
pub fn load_blacklist(path: &Path) -> Result<BlacklistRegistry> {
    if !path.exists() {
        info!(path = %path.display(), "no persisted blacklist yet, starting empty");
        return Ok(BlacklistRegistry::new());
    }

    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    let entries: Vec<BlacklistEntry> = serde_json::from_str(&raw).map_err(json_error(path))?;
    let registry = BlacklistRegistry::from_entries(entries);

    debug!(path = %path.display(), entries = registry.len(), "loaded blacklist");
    Ok(registry)
}

/// Atomically overwrite the persisted blacklist, in registry order.
pub fn save_blacklist(path: &Path, registry: &BlacklistRegistry) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let data = serde_json::to_string(registry.entries()).map_err(json_error(path))?;

    fs::write(&temp_path, data).map_err(io_error(&temp_path))?;
    fs::rename(&temp_path, path).map_err(io_error(path))?;

    debug!(path = %path.display(), entries = registry.len(), "saved blacklist");
    Ok(())
}

/// Read a text file as lines (changelog input).
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(raw.lines().map(str::to_string).collect())
}

/// Write one embed as JSON to `dir/<filename>`.
pub fn write_embed(dir: &Path, kind: EmbedKind, embed: &Embed) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let path = dir.join(kind.filename());
    let data = serde_json::to_string(embed).map_err(json_error(&path))?;
    fs::write(&path, data).map_err(io_error(&path))?;

    debug!(path = %path.display(), ?kind, "wrote embed");
    Ok(path)
}

/// Write every embed, returning the paths written.
pub fn write_embeds(dir: &Path, embeds: &[(EmbedKind, Embed)]) -> Result<Vec<PathBuf>> {
    embeds
        .iter()
        .map(|(kind, embed)| write_embed(dir, *kind, embed))
        .collect()
}
