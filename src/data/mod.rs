pub mod board;
pub mod offers;
pub mod projections;
pub mod types;

/// Coerce a free-form numeric cell; anything unparseable or non-finite is
/// missing, not an error.
pub(crate) fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
