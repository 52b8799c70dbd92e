/// Dataset ingestion for the dashboard.
///
/// The core consumes already-parsed rows; this module is the boundary that
/// produces them, from a local CSV file or an HTTP source.
///
/// Submodules:
/// - `csv` — hand-rolled parsing of the city daily-temperature CSV.

pub mod csv;
