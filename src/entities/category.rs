// 🏷️ Category Type - Offense vocabulary and display ranking
//
// Categories are stored as raw strings on each entry (the changelog is
// human-edited, so anything can show up). CategoryType is only used to
// decide where a category sorts in the "new entries" document.

// ============================================================================
// CATEGORY TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryType {
    /// Scammed another player
    Scam,

    /// Real money trading
    Rmt,

    /// Abuse of the in-game currency exchange
    Gw2Exchange,

    /// Anything else (trade etiquette, other ToS violations)
    Other,

    /// Reason lost over time
    Unknown,

    /// Free-form value not in the fixed vocabulary
    Custom(String),
}

impl CategoryType {
    /// Exact, case-sensitive match against the vocabulary.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Scam" => CategoryType::Scam,
            "RMT" => CategoryType::Rmt,
            "GW2Exchange" => CategoryType::Gw2Exchange,
            "Other" => CategoryType::Other,
            "Unknown" => CategoryType::Unknown,
            other => CategoryType::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryType::Scam => "Scam",
            CategoryType::Rmt => "RMT",
            CategoryType::Gw2Exchange => "GW2Exchange",
            CategoryType::Other => "Other",
            CategoryType::Unknown => "Unknown",
            CategoryType::Custom(raw) => raw,
        }
    }

    /// Display rank, lower sorts first. Unrecognized categories share the
    /// lowest priority with Unknown.
    pub fn rank(&self) -> u32 {
        match self {
            CategoryType::Scam => 100,
            CategoryType::Rmt => 200,
            CategoryType::Gw2Exchange => 300,
            CategoryType::Other => 400,
            CategoryType::Unknown | CategoryType::Custom(_) => 500,
        }
    }
}

/// Rank of a raw category string.
pub fn category_rank(raw: &str) -> u32 {
    CategoryType::parse(raw).rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table() {
        assert_eq!(category_rank("Scam"), 100);
        assert_eq!(category_rank("RMT"), 200);
        assert_eq!(category_rank("GW2Exchange"), 300);
        assert_eq!(category_rank("Other"), 400);
        assert_eq!(category_rank("Unknown"), 500);
        assert_eq!(category_rank("Botting"), 500);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(CategoryType::parse("rmt"), CategoryType::Custom("rmt".to_string()));
        assert_eq!(CategoryType::parse("scam"), CategoryType::Custom("scam".to_string()));
        assert_eq!(CategoryType::parse("Scam"), CategoryType::Scam);
    }

    #[test]
    fn test_as_str_round_trips_raw_value() {
        for raw in ["Scam", "RMT", "GW2Exchange", "Other", "Unknown", "Botting"] {
            assert_eq!(CategoryType::parse(raw).as_str(), raw);
        }
    }
}
