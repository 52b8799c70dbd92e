/// Aggregation and prediction for the temperature dashboard.
///
/// Everything here is a pure function of a borrowed `RecordStore` — each
/// call returns a freshly computed table or fit, with no shared mutable
/// buffers and no hidden state.
///
/// Submodules:
/// - `aggregate` — seasonal, monthly-by-day, and yearly mean tables.
/// - `regression` — same-calendar-day OLS temperature prediction.

pub mod aggregate;
pub mod regression;
