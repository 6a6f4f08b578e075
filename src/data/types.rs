use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::normalize::{normalize_player, normalize_prop};

/// The two sides of a prop line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Over,
    Under,
}

impl Side {
    /// Parse a sportsbook side label. Anything that is not an over/under
    /// label (spreads, moneylines) is out of vocabulary.
    pub fn parse(label: &str) -> Option<Side> {
        match label.trim().to_uppercase().as_str() {
            "OVER" => Some(Side::Over),
            "UNDER" => Some(Side::Under),
            _ => None,
        }
    }
}

/// Normalized (player, prop) pair — the join key used everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    pub player: String,
    pub prop: String,
}

impl CanonicalKey {
    pub fn new(raw_player: &str, raw_prop: &str) -> Self {
        Self {
            player: normalize_player(raw_player),
            prop: normalize_prop(raw_prop),
        }
    }
}

/// One vendor projection-market listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    pub player: String,
    pub team: String,
    pub prop: String,
    pub line: f64,
    pub listing_id: String,
    pub kickoff: Option<DateTime<Utc>>,
}

impl BoardEntry {
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(&self.player, &self.prop)
    }
}

/// One sportsbook quote, read once per run.
#[derive(Debug, Clone)]
pub struct RawOffer {
    pub player: String,
    pub prop: String,
    pub side: Side,
    pub line: f64,
    pub odds: f64,
    pub book: String,
}

impl RawOffer {
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(&self.player, &self.prop)
    }
}

/// A board entry matched to a sportsbook line. Odds on each side come from a
/// single winning offer; a side with no offers stays empty.
#[derive(Debug, Clone)]
pub struct MatchedLine {
    pub player: String,
    pub key: CanonicalKey,
    pub line: f64,
    pub over_odds: Option<f64>,
    pub under_odds: Option<f64>,
}

/// A matched line with its projection attached. Rows that never resolve a
/// projection are dropped before this type is produced.
#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub player: String,
    pub key: CanonicalKey,
    pub line: f64,
    pub over_odds: Option<f64>,
    pub under_odds: Option<f64>,
    pub projection: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("Over"), Some(Side::Over));
        assert_eq!(Side::parse("UNDER"), Some(Side::Under));
        assert_eq!(Side::parse(" over "), Some(Side::Over));
        assert_eq!(Side::parse("Spread"), None);
        assert_eq!(Side::parse(""), None);
    }

    #[test]
    fn test_canonical_key_equality() {
        let a = CanonicalKey::new("J. Smith", "REC");
        let b = CanonicalKey::new("J SMITH", "Receptions");
        assert_eq!(a, b);
    }
}
