use std::collections::{HashMap, HashSet};
use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub inputs: InputsConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub props: PropsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    /// The vendor board: either a CSV saved by an earlier pull or the raw
    /// JSON payload itself (`.json`).
    pub board: String,
    /// One odds CSV per sportsbook/league feed. No globbing — list them.
    pub odds_csvs: Vec<String>,
    /// The weekly projections file.
    pub projections_csv: String,
    #[serde(default = "default_league")]
    pub league: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub merged_csv: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropsConfig {
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_min_edge")]
    pub min_edge: f64,
    #[serde(default = "default_top_picks")]
    pub top_picks: usize,
    /// Minimum board line per canonical prop; props without an entry never
    /// qualify as value picks.
    #[serde(default = "default_min_lines")]
    pub min_lines: HashMap<String, f64>,
}

fn default_league() -> String {
    "NFL".to_string()
}

fn default_supported() -> Vec<String> {
    [
        "PASSING YARDS",
        "PASS ATTEMPTS",
        "PASS COMPLETIONS",
        "RUSHING YARDS",
        "RUSH ATTEMPTS",
        "RECEIVING YARDS",
        "RECEPTIONS",
        "RECEIVING + RUSH YARDS",
        "KICKING POINTS",
        "FIELD GOALS",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_min_edge() -> f64 {
    1.0
}

fn default_top_picks() -> usize {
    4
}

fn default_min_lines() -> HashMap<String, f64> {
    [
        ("PASS COMPLETIONS", 23.0),
        ("PASS ATTEMPTS", 30.0),
        ("RUSH ATTEMPTS", 10.0),
        ("RECEIVING YARDS", 35.0),
        ("RECEPTIONS", 2.5),
        ("RUSHING YARDS", 45.0),
        ("RECEIVING + RUSH YARDS", 65.0),
    ]
    .into_iter()
    .map(|(prop, min)| (prop.to_string(), min))
    .collect()
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_edge: default_min_edge(),
            top_picks: default_top_picks(),
            min_lines: default_min_lines(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Supported props as a lookup set.
    pub fn supported_props(&self) -> HashSet<String> {
        self.props.supported.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let toml_str = r#"
            [inputs]
            board = "board.csv"
            odds_csvs = ["odds/dk.csv"]
            projections_csv = "projections/week1.csv"

            [output]
            merged_csv = "merged.csv"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.inputs.league, "NFL");
        assert_eq!(config.props.supported.len(), 10);
        assert_eq!(config.analysis.top_picks, 4);
        assert!((config.analysis.min_edge - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.analysis.min_lines["RECEPTIONS"], 2.5);
    }

    #[test]
    fn test_overrides() {
        let toml_str = r#"
            [inputs]
            board = "board.json"
            odds_csvs = []
            projections_csv = "proj.csv"
            league = "NBA"

            [output]
            merged_csv = "merged.csv"

            [props]
            supported = ["POINTS"]

            [analysis]
            min_edge = 2.0
            top_picks = 10
            min_lines = { "POINTS" = 15.5 }
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.inputs.league, "NBA");
        assert_eq!(config.props.supported, vec!["POINTS"]);
        assert_eq!(config.analysis.top_picks, 10);
        assert_eq!(config.analysis.min_lines["POINTS"], 15.5);
    }
}
