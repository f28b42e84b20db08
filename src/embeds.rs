// 📣 Embeds - Announcement documents built from the reconciled blacklist
//
// Seven documents, one per EmbedKind. Each is a read-only view over the
// registry and the epoch lists:
//
// - New: only the two epoch lists, ranked by category
// - Scam / RMT A-L / RMT M-Z / Exchange / Other / Unknown: category rosters
//   of the full blacklist, with recent names emphasized

use serde::{Deserialize, Serialize};

use crate::entities::{BlacklistEntry, BlacklistRegistry};
use crate::parser::Epoch;
use crate::reconciliation::{EpochUpdates, UpdateEntry};

const NEW_PLAIN_TEXT: &str = "The following is the current list of individuals that we \
recommend you do not trade with. Individuals on this list have either broken \
ToS or have been reported for trade misconduct. The most recent addition is \
**bolded**. Older entry is *with cursive*.\n\n\
Check out <#1065084098613346398> for easier updating of your in-game blocklist!";

const OTHER_PREAMBLE: &str = "*Reasons other than the ones above. \nActivities such as: \
Gross misconduct, horrendous trade etiquette, other ToS violations, etc.. \n\
Most of them will still have something to do with trade.*\n\n";

const UNKNOWN_PREAMBLE: &str = "*The reason behind blacklisting these names has been lost \
with time.\nDespite this, we recommend not to trade with them.*\n\n";

const RMT_TITLE_A_TO_L: &str = "__RMT__  *(Real Money Trading)*  (A-L)";
const RMT_TITLE_M_TO_Z: &str = "__RMT__  *(Real Money Trading)*  (M-Z)";
const RMT_COLOR: u32 = 7451177;
const MISC_COLOR: u32 = 8604544;

// ============================================================================
// EMBED KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    New,
    Scam,
    RmtAToL,
    RmtMToZ,
    Exchange,
    Other,
    Unknown,
}

impl EmbedKind {
    /// Every document, in output order
    pub const ALL: [EmbedKind; 7] = [
        EmbedKind::New,
        EmbedKind::Scam,
        EmbedKind::RmtAToL,
        EmbedKind::RmtMToZ,
        EmbedKind::Exchange,
        EmbedKind::Other,
        EmbedKind::Unknown,
    ];

    pub fn filename(&self) -> &'static str {
        match self {
            EmbedKind::New => "new.txt",
            EmbedKind::Scam => "scam.txt",
            EmbedKind::RmtAToL => "rmta.txt",
            EmbedKind::RmtMToZ => "rmtb.txt",
            EmbedKind::Exchange => "exchange.txt",
            EmbedKind::Other => "other.txt",
            EmbedKind::Unknown => "unknown.txt",
        }
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            EmbedKind::New => None,
            EmbedKind::Scam => Some("__Scam__"),
            EmbedKind::RmtAToL => Some(RMT_TITLE_A_TO_L),
            EmbedKind::RmtMToZ => Some(RMT_TITLE_M_TO_Z),
            EmbedKind::Exchange => Some("__GW2 Exchange__"),
            EmbedKind::Other => Some("__Other__"),
            EmbedKind::Unknown => Some("__Unknown__"),
        }
    }

    /// Packed RGB
    pub fn color(&self) -> u32 {
        match self {
            EmbedKind::New => 16541188,
            EmbedKind::Scam => 14748684,
            EmbedKind::RmtAToL | EmbedKind::RmtMToZ => RMT_COLOR,
            EmbedKind::Exchange => 12297507,
            EmbedKind::Other | EmbedKind::Unknown => MISC_COLOR,
        }
    }

    pub fn footer(&self) -> Option<&'static str> {
        match self {
            EmbedKind::RmtAToL => Some("page 1/2"),
            EmbedKind::RmtMToZ => Some("page 2/2"),
            _ => None,
        }
    }

    /// Exact category a roster is filtered on. `None` for the New document.
    pub fn category(&self) -> Option<&'static str> {
        match self {
            EmbedKind::New => None,
            EmbedKind::Scam => Some("Scam"),
            EmbedKind::RmtAToL | EmbedKind::RmtMToZ => Some("RMT"),
            EmbedKind::Exchange => Some("GW2Exchange"),
            EmbedKind::Other => Some("Other"),
            EmbedKind::Unknown => Some("Unknown"),
        }
    }

    /// Inclusive range for the uppercased first letter of the username
    pub fn letter_range(&self) -> Option<(char, char)> {
        match self {
            EmbedKind::RmtAToL => Some(('A', 'L')),
            EmbedKind::RmtMToZ => Some(('M', 'Z')),
            _ => None,
        }
    }

    /// Fixed paragraph placed before the roster
    pub fn preamble(&self) -> Option<&'static str> {
        match self {
            EmbedKind::Other => Some(OTHER_PREAMBLE),
            EmbedKind::Unknown => Some(UNKNOWN_PREAMBLE),
            _ => None,
        }
    }

    /// Does this roster include the entry?
    pub fn includes(&self, entry: &BlacklistEntry) -> bool {
        let category_ok = self.category().is_some_and(|c| entry.category == c);
        let letter_ok = match self.letter_range() {
            Some((start, end)) => entry
                .username
                .to_uppercase()
                .chars()
                .next()
                .is_some_and(|first| (start..=end).contains(&first)),
            None => true,
        };
        category_ok && letter_ok
    }
}

// ============================================================================
// EMBED DOCUMENT
// ============================================================================

/// One generated document, serialized as-is to its output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(rename = "plainText", skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    pub color: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

// ============================================================================
// EMPHASIS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
    None,
}

/// Current epoch wins: a name in both lists is only bold.
pub fn emphasis_for(updates: &EpochUpdates, username: &str) -> Emphasis {
    if updates.lookup_current(username).is_some() {
        Emphasis::Bold
    } else if updates.lookup_previous(username).is_some() {
        Emphasis::Italic
    } else {
        Emphasis::None
    }
}

/// Wrap a roster name according to its epoch.
pub fn format_username(updates: &EpochUpdates, username: &str) -> String {
    match emphasis_for(updates, username) {
        Emphasis::Bold => format!("\n**{}**\n", username),
        Emphasis::Italic => format!("\n*{}*\n", username),
        Emphasis::None => username.to_string(),
    }
}

// ============================================================================
// NEW ENTRIES DOCUMENT
// ============================================================================

/// Code block language hint for an epoch block. Blocks with renames use `ini`
/// so the bracketed rename lines are highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    Ini,
    Fix,
}

impl BlockMode {
    pub fn for_block(block: &[UpdateEntry]) -> Self {
        if block.iter().any(UpdateEntry::is_rename) {
            BlockMode::Ini
        } else {
            BlockMode::Fix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockMode::Ini => "ini",
            BlockMode::Fix => "fix",
        }
    }
}

/// Lines of one epoch block, stable-sorted by category rank.
pub fn block_lines(block: &[UpdateEntry]) -> String {
    let mut sorted: Vec<&UpdateEntry> = block.iter().collect();
    sorted.sort_by_key(|u| u.sort_key());

    let mut res = String::new();
    for update in sorted {
        res.push_str(&update.to_new_line());
        res.push('\n');
    }
    res
}

fn new_description(updates: &EpochUpdates) -> String {
    format!(
        "**__New Entry__**\n```{}\n{}```\n\n**__Older Entry__**\n```{}\n{}```",
        BlockMode::for_block(updates.list(Epoch::Current)).as_str(),
        block_lines(updates.list(Epoch::Current)),
        BlockMode::for_block(updates.list(Epoch::Previous)).as_str(),
        block_lines(updates.list(Epoch::Previous)),
    )
}

// ============================================================================
// ROSTER DOCUMENTS
// ============================================================================

/// Entries shown by a roster, sorted case-insensitively by username.
pub fn roster_entries<'a>(kind: EmbedKind, registry: &'a BlacklistRegistry) -> Vec<&'a BlacklistEntry> {
    let category = match kind.category() {
        Some(category) => category,
        None => return Vec::new(),
    };
    let mut entries: Vec<&BlacklistEntry> = registry
        .by_category(category)
        .filter(|e| kind.includes(e))
        .collect();
    entries.sort_by_cached_key(|e| e.username.to_lowercase());
    entries
}

fn roster_description(kind: EmbedKind, registry: &BlacklistRegistry, updates: &EpochUpdates) -> String {
    let names = roster_entries(kind, registry)
        .into_iter()
        .map(|e| format_username(updates, &e.username))
        .collect::<Vec<_>>()
        .join("\n");

    match kind.preamble() {
        Some(preamble) => format!("{}{}", preamble, names),
        None => names,
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Build one document. Never fails and never mutates its inputs.
pub fn build_embed(kind: EmbedKind, registry: &BlacklistRegistry, updates: &EpochUpdates) -> Embed {
    match kind {
        EmbedKind::New => Embed {
            plain_text: Some(NEW_PLAIN_TEXT.to_string()),
            title: None,
            description: new_description(updates),
            color: kind.color(),
            footer: None,
        },
        _ => Embed {
            plain_text: None,
            title: kind.title().map(str::to_string),
            description: roster_description(kind, registry, updates),
            color: kind.color(),
            footer: kind.footer().map(str::to_string),
        },
    }
}

/// Build all seven documents in output order.
pub fn build_all(registry: &BlacklistRegistry, updates: &EpochUpdates) -> Vec<(EmbedKind, Embed)> {
    EmbedKind::ALL
        .iter()
        .map(|kind| (*kind, build_embed(*kind, registry, updates)))
        .collect()
}
