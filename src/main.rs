mod analysis;
mod config;
mod data;
mod pipeline;
mod report;

use std::path::Path;

use anyhow::{Context, Result};
use config::Config;
use data::types::Side;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("📊 Prop IQ merge starting...");

    // Load configuration
    tracing::info!("Loading configuration...");
    let config = Config::load("config.toml")?;
    let supported = config.supported_props();

    // Load the three input tables
    let board_path = Path::new(&config.inputs.board);
    let board = if board_path.extension().is_some_and(|ext| ext == "json") {
        let payload = std::fs::read_to_string(board_path)
            .with_context(|| format!("Failed to read board payload: {}", board_path.display()))?;
        data::board::parse_board_payload(&payload, &config.inputs.league)?
    } else {
        data::board::load_board_csv(board_path)?
    };
    let offers = data::offers::load_all_offers(&config.inputs.odds_csvs)?;
    let projections =
        data::projections::load_projections(Path::new(&config.inputs.projections_csv), &supported)?;

    // Normalize, match lines, join projections
    let merged = pipeline::run(&board, &offers, &projections, &supported);

    report::write_merged(Path::new(&config.output.merged_csv), &merged)?;

    // Rank value picks for the log
    let picks = analysis::edge::value_picks(&merged, &config.analysis);
    for pick in &picks {
        let side = match pick.recommended {
            Some(Side::Over) => "Over",
            Some(Side::Under) => "Under",
            None => "-",
        };
        tracing::info!(
            "Pick: {} {} line {} proj {:.1} edge {:+.1} (O {} / U {}) -> {}",
            pick.player,
            pick.prop,
            pick.line,
            pick.projection,
            pick.edge,
            analysis::edge::format_odds(pick.over_odds),
            analysis::edge::format_odds(pick.under_odds),
            side
        );
    }

    tracing::info!("✅ Done: {} merged rows, {} picks", merged.len(), picks.len());
    Ok(())
}
