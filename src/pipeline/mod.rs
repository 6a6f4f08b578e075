//! The three-stage merge: normalize, match lines, join projections.
//!
//! Each stage is a single deterministic pass over in-memory tables; the
//! driver below just wires them together and reports counts.

pub mod join;
pub mod lines;
pub mod normalize;

use std::collections::HashSet;

use tracing::info;

use crate::data::projections::ProjectionRow;
use crate::data::types::{BoardEntry, EnrichedRow, MatchedLine, RawOffer};
use join::ProjectionTable;
use lines::OfferBook;

/// Run the full pipeline over already-loaded tables.
pub fn run(
    board: &[BoardEntry],
    offers: &[RawOffer],
    projections: &[ProjectionRow],
    supported: &HashSet<String>,
) -> Vec<EnrichedRow> {
    let playable: Vec<&BoardEntry> = board
        .iter()
        .filter(|entry| supported.contains(&entry.key().prop))
        .collect();
    info!(
        "Board: {} entries, {} on supported props",
        board.len(),
        playable.len()
    );

    let book = OfferBook::build(offers);
    info!("Offers: {} quotes in {} line groups", offers.len(), book.len());

    let matched: Vec<MatchedLine> = playable
        .iter()
        .flat_map(|entry| book.match_entry(entry))
        .collect();
    info!("Line match: {} rows", matched.len());

    let table = ProjectionTable::build(projections);
    join::attach_projections(matched, &table)
}
