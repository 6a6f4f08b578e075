//! Groups sportsbook offers and matches each board entry to a line.
//!
//! Offers collapse into one group per (player, prop, line) holding the best
//! quote on each side. A board entry then matches a group through an ordered
//! rule list: the exact line first, then a half-point above when the over is
//! favored, then a half-point below when the under is favored. The wiggle is
//! only honored in the direction that keeps the same side favored, so a
//! half-point discrepancy never flips the recommended side.

use std::collections::HashMap;

use crate::data::types::{BoardEntry, CanonicalKey, MatchedLine, RawOffer, Side};

/// Lines are half-point multiples; keying them in half-point units keeps the
/// group map on integers and makes the wiggle a single step.
fn half_points(line: f64) -> i64 {
    (line * 2.0).round() as i64
}

/// Best available quote on each side of one (player, prop, line).
#[derive(Debug, Clone)]
pub struct OfferGroup {
    pub key: CanonicalKey,
    pub line: f64,
    pub over_odds: Option<f64>,
    pub under_odds: Option<f64>,
}

impl OfferGroup {
    fn new(key: CanonicalKey, line: f64) -> Self {
        Self {
            key,
            line,
            over_odds: None,
            under_odds: None,
        }
    }

    /// Fold one offer into the group, keeping the most negative (most
    /// favorite-leaning) American odds per side.
    fn absorb(&mut self, offer: &RawOffer) {
        let slot = match offer.side {
            Side::Over => &mut self.over_odds,
            Side::Under => &mut self.under_odds,
        };
        *slot = Some(match *slot {
            Some(best) => best.min(offer.odds),
            None => offer.odds,
        });
    }

    /// True when the over side is strictly more favored than the under.
    /// Needs both sides quoted; ties favor neither, so this and
    /// [`under_favored`](Self::under_favored) are never both true.
    pub fn over_favored(&self) -> bool {
        matches!((self.over_odds, self.under_odds), (Some(o), Some(u)) if o < u)
    }

    pub fn under_favored(&self) -> bool {
        matches!((self.over_odds, self.under_odds), (Some(o), Some(u)) if u < o)
    }
}

/// All offer groups for a run, indexed by key and half-point line.
pub struct OfferBook {
    groups: HashMap<(CanonicalKey, i64), OfferGroup>,
}

impl OfferBook {
    /// Reduce raw offers to best-odds-per-side groups.
    pub fn build(offers: &[RawOffer]) -> Self {
        let mut groups: HashMap<(CanonicalKey, i64), OfferGroup> = HashMap::new();
        for offer in offers {
            let key = offer.key();
            let group = groups
                .entry((key.clone(), half_points(offer.line)))
                .or_insert_with(|| OfferGroup::new(key, offer.line));
            group.absorb(offer);
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group_at(&self, key: &CanonicalKey, hp: i64) -> Option<&OfferGroup> {
        self.groups.get(&(key.clone(), hp))
    }

    /// Match one board entry against the book.
    ///
    /// Rules run in priority order and the first one that yields any group
    /// wins; every group it yields becomes a separate matched row carrying
    /// the *board* line. An entry no rule satisfies is dropped.
    pub fn match_entry(&self, entry: &BoardEntry) -> Vec<MatchedLine> {
        let key = entry.key();
        let hp = half_points(entry.line);

        for rule in MATCH_RULES {
            let hits = rule.apply(self, &key, hp);
            if !hits.is_empty() {
                return hits
                    .into_iter()
                    .map(|group| MatchedLine {
                        player: entry.player.clone(),
                        key: key.clone(),
                        line: entry.line,
                        over_odds: group.over_odds,
                        under_odds: group.under_odds,
                    })
                    .collect();
            }
        }

        Vec::new()
    }
}

/// The match policy as an explicit ordered rule list, so the priority order
/// stays auditable and testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchRule {
    /// Board line equals the group line.
    Exact,
    /// Group sits a half-point above the board line and the over is favored
    /// there.
    HalfUpOverFavored,
    /// Group sits a half-point below the board line and the under is favored
    /// there.
    HalfDownUnderFavored,
}

const MATCH_RULES: [MatchRule; 3] = [
    MatchRule::Exact,
    MatchRule::HalfUpOverFavored,
    MatchRule::HalfDownUnderFavored,
];

impl MatchRule {
    fn apply<'a>(self, book: &'a OfferBook, key: &CanonicalKey, hp: i64) -> Vec<&'a OfferGroup> {
        let hit = match self {
            MatchRule::Exact => book.group_at(key, hp),
            MatchRule::HalfUpOverFavored => {
                book.group_at(key, hp + 1).filter(|g| g.over_favored())
            }
            MatchRule::HalfDownUnderFavored => {
                book.group_at(key, hp - 1).filter(|g| g.under_favored())
            }
        };
        hit.into_iter().collect()
    }
}
