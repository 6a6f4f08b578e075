//! Projection-source loading and normalization.
//!
//! Weekly projection files come from several providers with no common
//! schema, so the player, prop, and value columns are detected by synonym.
//! A file where any of the three cannot be found is misconfigured input and
//! fails the run; a row whose value does not parse is just skipped.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

use crate::data::parse_numeric;
use crate::data::types::CanonicalKey;

/// Accepted header spellings, probed in order.
const PLAYER_COLUMNS: &[&str] = &["player", "Player", "name", "Name", "athlete", "Athlete"];
const PROP_COLUMNS: &[&str] = &[
    "prop", "Prop", "market", "Market", "stat", "Stat", "category", "Category",
];
const VALUE_COLUMNS: &[&str] = &[
    "projection",
    "Projection",
    "proj",
    "Proj",
    "value",
    "Value",
    "mean",
    "Mean",
];

/// One projection keyed for the join.
#[derive(Debug, Clone)]
pub struct ProjectionRow {
    pub key: CanonicalKey,
    pub value: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read projections file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in projections file {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error(
        "could not detect a {field} column in the projections file \
         (accepted headers: {candidates:?})"
    )]
    MissingColumn {
        field: &'static str,
        candidates: &'static [&'static str],
    },
}

/// Return the index of the first candidate header present.
fn detect_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h.trim() == *c))
}

/// Some providers tack the team code onto the player cell ("Jalen Hurts
/// PHI"). Strip a trailing 2-3 letter all-caps token, but only from
/// mixed-case names so all-caps sources ("SMITH, JOHN") keep their last
/// word.
fn strip_team_suffix(raw: &str, re: &Regex) -> String {
    if raw.chars().any(|c| c.is_lowercase()) {
        re.replace(raw.trim(), "").trim().to_string()
    } else {
        raw.trim().to_string()
    }
}

fn load_from_reader<R: Read>(
    rdr: R,
    supported: &HashSet<String>,
) -> Result<Vec<ProjectionRow>, ProjectionError> {
    let csv_err = |source| ProjectionError::Csv {
        path: "<reader>".to_string(),
        source,
    };

    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let player_col =
        detect_column(&headers, PLAYER_COLUMNS).ok_or(ProjectionError::MissingColumn {
            field: "player",
            candidates: PLAYER_COLUMNS,
        })?;
    let prop_col = detect_column(&headers, PROP_COLUMNS).ok_or(ProjectionError::MissingColumn {
        field: "prop",
        candidates: PROP_COLUMNS,
    })?;
    let value_col =
        detect_column(&headers, VALUE_COLUMNS).ok_or(ProjectionError::MissingColumn {
            field: "value",
            candidates: VALUE_COLUMNS,
        })?;

    let team_suffix = Regex::new(r"\s[A-Z]{2,3}$").expect("static regex");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;

        let player = match record.get(player_col) {
            Some(p) if !p.trim().is_empty() => strip_team_suffix(p, &team_suffix),
            _ => continue,
        };
        let prop = record.get(prop_col).unwrap_or("").to_string();

        let value = match record.get(value_col).and_then(parse_numeric) {
            Some(v) => v,
            None => {
                warn!("skipping projection row for '{}': unparseable value", player);
                continue;
            }
        };

        let key = CanonicalKey::new(&player, &prop);
        if !supported.contains(&key.prop) {
            continue;
        }
        rows.push(ProjectionRow { key, value });
    }

    Ok(rows)
}

/// Load the projection source, keeping only supported props.
pub fn load_projections(
    path: &Path,
    supported: &HashSet<String>,
) -> Result<Vec<ProjectionRow>, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let rows = load_from_reader(file, supported).map_err(|e| match e {
        ProjectionError::Csv { source, .. } => ProjectionError::Csv {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;

    info!("Loaded {} projection rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> HashSet<String> {
        ["RECEPTIONS", "RUSHING YARDS", "PASSING YARDS"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_standard_headers() {
        let csv_data = "\
player,prop,projection
John Smith,Receptions,6.1
Jane Doe,Rushing Yards,55.0";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key.player, "JOHN SMITH");
        assert_eq!(rows[0].key.prop, "RECEPTIONS");
        assert!((rows[0].value - 6.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_synonym_headers() {
        let csv_data = "\
Name,Market,Mean
John Smith,Receptions,6.1";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_missing_value_column_is_fatal() {
        let csv_data = "\
player,prop,points
John Smith,Receptions,6.1";

        let err = load_from_reader(csv_data.as_bytes(), &supported()).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::MissingColumn { field: "value", .. }
        ));
    }

    #[test]
    fn test_missing_player_column_is_fatal() {
        let csv_data = "\
who,prop,projection
John Smith,Receptions,6.1";

        let err = load_from_reader(csv_data.as_bytes(), &supported()).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::MissingColumn { field: "player", .. }
        ));
    }

    #[test]
    fn test_unparseable_value_skipped() {
        let csv_data = "\
player,prop,projection
John Smith,Receptions,6.1
Jane Doe,Receptions,DNP
Nan Guy,Receptions,NaN";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unsupported_props_filtered() {
        let csv_data = "\
player,prop,projection
John Smith,Receptions,6.1
John Smith,Tackles + Assists,4.0";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_team_suffix_stripped_from_mixed_case() {
        let csv_data = "\
player,prop,projection
Jalen Hurts PHI,Passing Yards,245.3";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows[0].key.player, "JALEN HURTS");
    }

    #[test]
    fn test_all_caps_names_kept_whole() {
        let csv_data = "\
player,prop,projection
\"SMITH, JOHN\",Receptions,6.1";

        let rows = load_from_reader(csv_data.as_bytes(), &supported()).unwrap();
        assert_eq!(rows[0].key.player, "SMITH JOHN");
    }
}
