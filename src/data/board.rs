//! Vendor board ingestion.
//!
//! The projections vendor serves one JSON document: a `data` array of
//! listings whose player and league live behind relationship ids, plus an
//! `included` array carrying the player and league records themselves. The
//! scraping that obtains the document happens elsewhere; this module only
//! decodes it. A previously saved board CSV can be read back the same way.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::data::parse_numeric;
use crate::data::types::BoardEntry;

#[derive(Debug, Deserialize)]
struct BoardDocument {
    #[serde(default)]
    data: Vec<Listing>,
    #[serde(default)]
    included: Vec<Included>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    id: String,
    #[serde(default)]
    attributes: ListingAttributes,
    #[serde(default)]
    relationships: Relationships,
}

#[derive(Debug, Default, Deserialize)]
struct ListingAttributes {
    #[serde(default)]
    stat_type: Option<String>,
    #[serde(default)]
    line_score: Option<serde_json::Value>,
    #[serde(default)]
    start_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Relationships {
    #[serde(default)]
    league: Option<RelRef>,
    #[serde(default)]
    new_player: Option<RelRef>,
    #[serde(default)]
    player: Option<RelRef>,
}

#[derive(Debug, Deserialize)]
struct RelRef {
    #[serde(default)]
    data: Option<RelData>,
}

#[derive(Debug, Deserialize)]
struct RelData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Included {
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    attributes: IncludedAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct IncludedAttributes {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

struct PlayerInfo {
    name: String,
    team: String,
}

/// The vendor ships `line_score` as either a number or a string.
fn coerce_line(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn parse_kickoff(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decode the vendor document into board entries for one league.
/// Listings outside the league, without a resolvable player, or without a
/// numeric line are dropped.
pub fn parse_board_payload(payload: &str, league: &str) -> Result<Vec<BoardEntry>> {
    let doc: BoardDocument =
        serde_json::from_str(payload).context("Failed to parse board payload")?;

    let mut players: HashMap<String, PlayerInfo> = HashMap::new();
    let mut leagues: HashMap<String, String> = HashMap::new();

    for inc in &doc.included {
        match inc.kind.as_str() {
            "players" | "new_players" | "new_player" => {
                let attrs = &inc.attributes;
                let name = attrs
                    .name
                    .clone()
                    .or_else(|| attrs.display_name.clone())
                    .or_else(|| attrs.full_name.clone())
                    .unwrap_or_else(|| "UNKNOWN".to_string());
                let team = attrs.team.clone().unwrap_or_else(|| "N/A".to_string());
                players.insert(inc.id.clone(), PlayerInfo { name, team });
            }
            kind if kind.contains("league") => {
                if let Some(name) = &inc.attributes.name {
                    leagues.insert(inc.id.clone(), name.clone());
                }
            }
            _ => {}
        }
    }

    let mut entries = Vec::new();
    for listing in &doc.data {
        let league_id = listing
            .relationships
            .league
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .map(|d| d.id.as_str());
        let league_name = league_id.and_then(|id| leagues.get(id));
        if league_name.map(String::as_str) != Some(league) {
            continue;
        }

        let player_ref = listing
            .relationships
            .new_player
            .as_ref()
            .or(listing.relationships.player.as_ref());
        let player = match player_ref
            .and_then(|r| r.data.as_ref())
            .and_then(|d| players.get(&d.id))
        {
            Some(p) => p,
            None => continue,
        };

        let line = match listing.attributes.line_score.as_ref().and_then(coerce_line) {
            Some(l) => l,
            None => {
                warn!("skipping listing {}: no numeric line", listing.id);
                continue;
            }
        };

        entries.push(BoardEntry {
            player: player.name.clone(),
            team: player.team.clone(),
            prop: listing
                .attributes
                .stat_type
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            line,
            listing_id: listing.id.clone(),
            kickoff: parse_kickoff(listing.attributes.start_time.as_deref()),
        });
    }

    info!("Parsed {} {} board entries from payload", entries.len(), league);
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct BoardRecord {
    player: String,
    #[serde(default)]
    team: String,
    prop: String,
    #[serde(default, alias = "pp_line")]
    line: String,
    #[serde(default, alias = "projection_id")]
    listing_id: String,
    #[serde(default)]
    kickoff: String,
}

fn load_csv_from_reader<R: Read>(rdr: R) -> Result<Vec<BoardEntry>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut entries = Vec::new();

    for result in reader.deserialize::<BoardRecord>() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed board row: {}", e);
                continue;
            }
        };

        let line = match parse_numeric(&record.line) {
            Some(l) => l,
            None => {
                warn!("skipping board row for '{}': no numeric line", record.player);
                continue;
            }
        };

        entries.push(BoardEntry {
            player: record.player,
            team: record.team,
            prop: record.prop,
            line,
            listing_id: record.listing_id,
            kickoff: parse_kickoff(Some(record.kickoff.as_str())),
        });
    }

    Ok(entries)
}

/// Read a board saved as CSV by an earlier pull.
pub fn load_board_csv(path: &Path) -> Result<Vec<BoardEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open board file: {}", path.display()))?;

    let entries = load_csv_from_reader(file)
        .with_context(|| format!("Failed to parse board file: {}", path.display()))?;

    info!("Loaded {} board entries from {}", entries.len(), path.display());
    Ok(entries)
}
