//! Sportsbook odds ingestion.
//!
//! One CSV per book/league, columns named either in the feed's lowercase
//! style (`description`, `market`, ...) or already renamed. Numeric cells
//! that fail to parse are treated as missing and the row is excluded before
//! matching ever sees it.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::data::parse_numeric;
use crate::data::types::{RawOffer, Side};

#[derive(Debug, Deserialize)]
struct OfferRecord {
    #[serde(alias = "description", alias = "Player")]
    player: String,
    #[serde(alias = "market", alias = "Prop")]
    prop: String,
    #[serde(alias = "label", alias = "Label")]
    label: String,
    #[serde(default, alias = "price", alias = "Odds")]
    odds: String,
    #[serde(default, alias = "point", alias = "Line")]
    line: String,
    #[serde(default, alias = "bookmaker", alias = "Book")]
    book: String,
}

fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<RawOffer>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut offers = Vec::new();

    for result in reader.deserialize::<OfferRecord>() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed odds row: {}", e);
                continue;
            }
        };

        let side = match Side::parse(&record.label) {
            Some(s) => s,
            // Spread/moneyline/alt labels are out of vocabulary here.
            None => continue,
        };

        let (line, odds) = match (parse_numeric(&record.line), parse_numeric(&record.odds)) {
            (Some(line), Some(odds)) => (line, odds),
            _ => {
                warn!(
                    "skipping odds row for '{}' {}: missing line or odds",
                    record.player, record.prop
                );
                continue;
            }
        };

        if record.player.trim().is_empty() || record.prop.trim().is_empty() {
            continue;
        }

        offers.push(RawOffer {
            player: record.player,
            prop: record.prop,
            side,
            line,
            odds,
            book: record.book,
        });
    }

    Ok(offers)
}

/// Load one sportsbook odds file.
pub fn load_offers(path: &Path) -> Result<Vec<RawOffer>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open odds file: {}", path.display()))?;

    let offers = load_from_reader(file)
        .with_context(|| format!("Failed to parse odds file: {}", path.display()))?;

    info!("Loaded {} offers from {}", offers.len(), path.display());
    Ok(offers)
}

/// Load and concatenate every configured odds file. At least one file must
/// load; an empty source list is a configuration error.
pub fn load_all_offers(paths: &[String]) -> Result<Vec<RawOffer>> {
    anyhow::ensure!(!paths.is_empty(), "No sportsbook odds files configured");

    let mut all = Vec::new();
    for path in paths {
        all.extend(load_offers(Path::new(path))?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_style_headers() {
        let csv_data = "\
description,market,label,price,point,bookmaker
J. Smith,player_receptions,Over,-120,5.5,draftkings
J. Smith,player_receptions,Under,100,5.5,draftkings";

        let offers = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].side, Side::Over);
        assert_eq!(offers[0].odds, -120.0);
        assert_eq!(offers[0].line, 5.5);
        assert_eq!(offers[0].book, "draftkings");
    }

    #[test]
    fn test_renamed_headers() {
        let csv_data = "\
Player,Prop,Label,Odds,Line,Book
J. Smith,Receptions,Under,+100,5.5,fanduel";

        let offers = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].odds, 100.0);
    }

    #[test]
    fn test_missing_numerics_dropped() {
        let csv_data = "\
description,market,label,price,point,bookmaker
A,player_receptions,Over,-120,,draftkings
B,player_receptions,Over,N/A,5.5,draftkings
C,player_receptions,Over,-110,5.5,draftkings";

        let offers = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].player, "C");
    }

    #[test]
    fn test_non_total_labels_dropped() {
        let csv_data = "\
description,market,label,price,point,bookmaker
A,player_anytime_td,Yes,-150,0.5,draftkings
B,player_receptions,Over,-110,5.5,draftkings";

        let offers = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].player, "B");
    }

    #[test]
    fn test_empty_file() {
        let csv_data = "description,market,label,price,point,bookmaker";
        let offers = load_from_reader(csv_data.as_bytes()).unwrap();
        assert!(offers.is_empty());
    }
}
