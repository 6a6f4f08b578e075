use crate::data::types::Side;

/// One row that cleared the value filters, ranked for reporting.
#[derive(Debug, Clone)]
pub struct ValuePick {
    pub player: String,
    pub prop: String,
    pub line: f64,
    pub projection: f64,
    pub edge: f64,
    pub over_odds: Option<f64>,
    pub under_odds: Option<f64>,
    pub recommended: Option<Side>,
}
