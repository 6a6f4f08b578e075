//! Attaches projection values to matched lines.
//!
//! The primary pass joins on exact canonical key. Rows it leaves behind get
//! one retry against an index of word-rotated projection names, which makes
//! "LAST FIRST" sources line up with "FIRST LAST" keys. Rows that resolve in
//! neither pass are dropped — a missing projection is a filtered-out case,
//! not an error.

use std::collections::HashMap;

use tracing::info;

use crate::data::projections::ProjectionRow;
use crate::data::types::{CanonicalKey, EnrichedRow, MatchedLine};
use crate::pipeline::normalize::swap_name_order;

/// Projection values indexed by canonical key, plus the name-rotated
/// fallback index.
pub struct ProjectionTable {
    direct: HashMap<CanonicalKey, f64>,
    rotated: HashMap<CanonicalKey, f64>,
}

impl ProjectionTable {
    /// Build both indexes. On duplicate keys the first row wins.
    pub fn build(rows: &[ProjectionRow]) -> Self {
        let mut direct = HashMap::new();
        let mut rotated = HashMap::new();

        for row in rows {
            direct.entry(row.key.clone()).or_insert(row.value);

            let alt = CanonicalKey {
                player: swap_name_order(&row.key.player),
                prop: row.key.prop.clone(),
            };
            rotated.entry(alt).or_insert(row.value);
        }

        Self { direct, rotated }
    }

    pub fn len(&self) -> usize {
        self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }

    fn lookup(&self, key: &CanonicalKey) -> Option<f64> {
        self.direct.get(key).copied()
    }

    fn lookup_rotated(&self, key: &CanonicalKey) -> Option<f64> {
        self.rotated.get(key).copied()
    }
}

/// Left-join projections onto matched lines, retrying unmatched rows through
/// the rotated index, then drop whatever is still unresolved.
pub fn attach_projections(matched: Vec<MatchedLine>, table: &ProjectionTable) -> Vec<EnrichedRow> {
    let total = matched.len();
    let mut swapped = 0usize;

    let enriched: Vec<EnrichedRow> = matched
        .into_iter()
        .filter_map(|row| {
            let projection = table.lookup(&row.key).or_else(|| {
                let hit = table.lookup_rotated(&row.key);
                if hit.is_some() {
                    swapped += 1;
                }
                hit
            })?;

            Some(EnrichedRow {
                player: row.player,
                key: row.key,
                line: row.line,
                over_odds: row.over_odds,
                under_odds: row.under_odds,
                projection,
            })
        })
        .collect();

    info!(
        "Projection join: {}/{} rows resolved ({} via name swap, {} dropped)",
        enriched.len(),
        total,
        swapped,
        total - enriched.len()
    );

    enriched
}
