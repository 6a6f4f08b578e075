//! Edge analysis over the merged table.
//!
//! Turns enriched rows into a recommended side and a ranked shortlist of
//! value picks. The recommendation leans on odds first (more negative wins)
//! and falls back to projection vs line only on a dead tie.

use tracing::info;

use crate::analysis::types::ValuePick;
use crate::config::AnalysisConfig;
use crate::data::types::{EnrichedRow, Side};

/// Which side to take on a row. Requires both sides quoted; an odds tie is
/// broken by the projection, and a full tie recommends nothing.
pub fn recommended_side(row: &EnrichedRow) -> Option<Side> {
    let (over, under) = match (row.over_odds, row.under_odds) {
        (Some(o), Some(u)) => (o, u),
        _ => return None,
    };

    if over < under {
        Some(Side::Over)
    } else if under < over {
        Some(Side::Under)
    } else if row.projection > row.line {
        Some(Side::Over)
    } else if row.projection < row.line {
        Some(Side::Under)
    } else {
        None
    }
}

/// Projection distance above the board line.
pub fn edge(row: &EnrichedRow) -> f64 {
    row.projection - row.line
}

/// Render American odds the way books print them: rounded, `+` on the dog.
pub fn format_odds(odds: Option<f64>) -> String {
    match odds {
        Some(value) => {
            let rounded = value.round() as i64;
            if rounded > 0 {
                format!("+{}", rounded)
            } else {
                rounded.to_string()
            }
        }
        None => "-".to_string(),
    }
}

/// Filter the merged table down to over-side value picks and rank them.
///
/// A row qualifies when its prop has a configured minimum line and the line
/// meets it, the projection clears the line, and the edge meets the
/// configured minimum. Ranking is edge descending, then over-odds strength
/// ascending; the top N survive.
pub fn value_picks(rows: &[EnrichedRow], config: &AnalysisConfig) -> Vec<ValuePick> {
    let mut picks: Vec<ValuePick> = rows
        .iter()
        .filter(|row| {
            config
                .min_lines
                .get(&row.key.prop)
                .is_some_and(|min| row.line >= *min)
        })
        .filter(|row| row.projection > row.line)
        .filter(|row| edge(row) >= config.min_edge)
        .map(|row| ValuePick {
            player: row.player.clone(),
            prop: row.key.prop.clone(),
            line: row.line,
            projection: row.projection,
            edge: edge(row),
            over_odds: row.over_odds,
            under_odds: row.under_odds,
            recommended: recommended_side(row),
        })
        .collect();

    picks.sort_by(|a, b| {
        b.edge
            .partial_cmp(&a.edge)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                odds_strength_of(a)
                    .partial_cmp(&odds_strength_of(b))
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    picks.truncate(config.top_picks);

    info!("Value analysis: {} picks", picks.len());
    picks
}

/// Tie-break strength: how strong the over quote is. Missing over odds rank
/// last.
fn odds_strength_of(pick: &ValuePick) -> f64 {
    pick.over_odds.map(f64::abs).unwrap_or(9999.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::CanonicalKey;

    fn row(
        player: &str,
        prop: &str,
        line: f64,
        over: Option<f64>,
        under: Option<f64>,
        projection: f64,
    ) -> EnrichedRow {
        EnrichedRow {
            player: player.to_string(),
            key: CanonicalKey::new(player, prop),
            line,
            over_odds: over,
            under_odds: under,
            projection,
        }
    }

    #[test]
    fn test_recommended_by_odds() {
        let r = row("A", "Receptions", 5.5, Some(-120.0), Some(100.0), 5.0);
        assert_eq!(recommended_side(&r), Some(Side::Over));

        let r = row("A", "Receptions", 5.5, Some(105.0), Some(-125.0), 9.0);
        assert_eq!(recommended_side(&r), Some(Side::Under));
    }

    #[test]
    fn test_recommended_tie_uses_projection() {
        let r = row("A", "Receptions", 5.5, Some(-110.0), Some(-110.0), 6.5);
        assert_eq!(recommended_side(&r), Some(Side::Over));

        let r = row("A", "Receptions", 5.5, Some(-110.0), Some(-110.0), 4.5);
        assert_eq!(recommended_side(&r), Some(Side::Under));

        let r = row("A", "Receptions", 5.5, Some(-110.0), Some(-110.0), 5.5);
        assert_eq!(recommended_side(&r), None);
    }

    #[test]
    fn test_recommended_needs_both_sides() {
        let r = row("A", "Receptions", 5.5, Some(-120.0), None, 9.0);
        assert_eq!(recommended_side(&r), None);
    }

    #[test]
    fn test_format_odds() {
        assert_eq!(format_odds(Some(-120.0)), "-120");
        assert_eq!(format_odds(Some(100.0)), "+100");
        assert_eq!(format_odds(Some(102.6)), "+103");
        assert_eq!(format_odds(None), "-");
    }

    #[test]
    fn test_value_picks_filters_and_ranking() {
        let config = AnalysisConfig::default();
        let rows = vec![
            // Edge 3.0, strong over odds.
            row("A", "Receptions", 3.5, Some(-130.0), Some(105.0), 6.5),
            // Edge 3.0, weaker over odds: ranks after A.
            row("B", "Receptions", 3.5, Some(-110.0), Some(-110.0), 6.5),
            // Edge 5.0: ranks first.
            row("C", "Rushing Yards", 50.5, Some(-115.0), Some(-105.0), 55.5),
            // Below the per-prop minimum line.
            row("D", "Receptions", 1.5, Some(-130.0), Some(105.0), 4.5),
            // Projection under the line.
            row("E", "Receptions", 5.5, Some(-130.0), Some(105.0), 4.0),
            // Edge under the minimum.
            row("F", "Receptions", 5.5, Some(-130.0), Some(105.0), 6.0),
            // No threshold configured for this prop.
            row("G", "Passing Yards", 250.5, Some(-130.0), Some(105.0), 270.0),
        ];

        let picks = value_picks(&rows, &config);
        let names: Vec<&str> = picks.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!((picks[0].edge - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_picks_truncated() {
        let mut config = AnalysisConfig::default();
        config.top_picks = 1;
        let rows = vec![
            row("A", "Receptions", 3.5, Some(-130.0), Some(105.0), 6.5),
            row("B", "Receptions", 3.5, Some(-110.0), Some(-110.0), 6.5),
        ];
        assert_eq!(value_picks(&rows, &config).len(), 1);
    }
}
