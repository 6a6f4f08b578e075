//! Writes the merged table — the one artifact downstream consumers read.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::data::types::EnrichedRow;

#[derive(Debug, Serialize)]
struct MergedRecord<'a> {
    player: &'a str,
    prop: &'a str,
    line: f64,
    over_odds: Option<f64>,
    under_odds: Option<f64>,
    projection: f64,
}

/// Write the enriched table as CSV, overwriting any previous run.
pub fn write_merged(path: &Path, rows: &[EnrichedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    for row in rows {
        writer.serialize(MergedRecord {
            player: &row.player,
            prop: &row.key.prop,
            line: row.line,
            over_odds: row.over_odds,
            under_odds: row.under_odds,
            projection: row.projection,
        })?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    info!("Saved {} merged rows to {}", rows.len(), path.display());
    Ok(())
}
