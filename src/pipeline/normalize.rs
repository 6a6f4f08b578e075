//! Canonical forms for free-text player names and prop labels.
//!
//! Every join in the pipeline goes through these two functions, so they are
//! applied identically to the vendor board, the sportsbook odds, and the
//! projection source. Both are idempotent: normalizing twice is the same as
//! normalizing once.

/// Canonicalize a player name: uppercase, drop periods and apostrophes,
/// turn hyphens and commas into spaces, collapse whitespace.
///
/// "St. Brown, Amon-Ra" and "AMON RA ST BROWN"-style variants land on the
/// same token sequence modulo word order (see [`swap_name_order`]).
pub fn normalize_player(raw: &str) -> String {
    let cleaned: String = raw
        .to_uppercase()
        .chars()
        .filter_map(|c| match c {
            '.' | '\'' => None,
            '-' | ',' => Some(' '),
            other => Some(other),
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalize a prop label: uppercase + trim, then one fixed lookup.
/// Labels outside the table pass through unchanged — the vocabulary is
/// open, and unknown props are filtered later, not rejected here.
pub fn normalize_prop(raw: &str) -> String {
    let n = raw.trim().to_uppercase();
    let mapped = match n.as_str() {
        // Passing
        "PASS YDS" | "PASS YARDS" | "PASSING YARDS" | "PLAYER_PASS_YDS" => "PASSING YARDS",
        "PASS ATT" | "PASS ATTEMPTS" | "PLAYER_PASS_ATTEMPTS" | "PLAYER_PASS_ATT" => {
            "PASS ATTEMPTS"
        }
        "PASS COMP" | "PASS COMPLETIONS" | "PLAYER_PASS_COMPLETIONS" | "PLAYER_PASS_COMP" => {
            "PASS COMPLETIONS"
        }
        // Rushing
        "RUSH YDS" | "RUSH YARDS" | "RUSHING YARDS" | "PLAYER_RUSH_YDS" => "RUSHING YARDS",
        "RUSH ATT" | "RUSH ATTEMPTS" | "PLAYER_RUSH_ATTEMPTS" | "PLAYER_RUSH_ATT" => {
            "RUSH ATTEMPTS"
        }
        // Receiving
        "REC YDS" | "RECEIVING YDS" | "RECEIVING YARDS" | "PLAYER_RECEPTION_YDS"
        | "PLAYER_RECEIV_YDS" => "RECEIVING YARDS",
        "REC" | "RECEPTIONS" | "PLAYER_RECEPTIONS" => "RECEPTIONS",
        // Combo
        "RUSH + REC YDS" | "RECEIVING + RUSH YARDS" | "PLAYER_RUSH_RECEPTION_YDS" => {
            "RECEIVING + RUSH YARDS"
        }
        // Kicking
        "KICKING POINTS" | "PLAYER_KICKING_POINTS" => "KICKING POINTS",
        "FIELD GOALS" | "PLAYER_FIELD_GOALS" => "FIELD GOALS",
        _ => return n,
    };
    mapped.to_string()
}

/// Rotate the first word of a normalized name to the end, so a
/// "LAST FIRST"-style source compares equal to "FIRST LAST".
/// Names with fewer than two words come back unchanged.
pub fn swap_name_order(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() < 2 {
        return name.to_string();
    }
    let mut rotated: Vec<&str> = parts[1..].to_vec();
    rotated.push(parts[0]);
    rotated.join(" ")
}
