/// Immutable record store for the daily-temperature dataset.
///
/// The store is built once from parsed rows, validated and sorted at
/// construction, and read-only for the process lifetime. All other modules
/// borrow views of it — aggregation and prediction never mutate the store,
/// which makes it safely shareable across any number of read requests.

use crate::model::{DataLoadError, Observation, RawRow, Season};

/// Ordered, read-only collection of daily observations.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    observations: Vec<Observation>,
}

impl RecordStore {
    /// Builds a store from already-parsed rows.
    ///
    /// Fails on an empty row set or on any row with a calendar-impossible
    /// month or day field; no partial store is returned. Rows are sorted
    /// by (year, month, day) so `observations` is a chronological view
    /// regardless of source order.
    pub fn from_rows(rows: Vec<RawRow>) -> Result<RecordStore, DataLoadError> {
        if rows.is_empty() {
            return Err(DataLoadError::EmptyDataset);
        }

        let mut observations = Vec::with_capacity(rows.len());
        for row in rows {
            let season = Season::from_month(row.month).ok_or(DataLoadError::InvalidField {
                line: row.line,
                field: "month",
                value: row.month.to_string(),
            })?;
            if row.day < 1 || row.day > 31 {
                return Err(DataLoadError::InvalidField {
                    line: row.line,
                    field: "day",
                    value: row.day.to_string(),
                });
            }
            observations.push(Observation {
                year: row.year,
                month: row.month,
                day: row.day,
                temperature: row.temperature,
                season,
            });
        }

        observations.sort_by_key(|o| (o.year, o.month, o.day));
        Ok(RecordStore { observations })
    }

    /// Chronologically ordered read-only view of all observations.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Inclusive (first, last) year present in the store. Construction
    /// rejects empty row sets, so both bounds always exist.
    pub fn year_range(&self) -> (i32, i32) {
        let first = self.observations.first().map(|o| o.year).unwrap_or(0);
        let last = self.observations.last().map(|o| o.year).unwrap_or(0);
        (first, last)
    }

    /// Count of observations that carry a present temperature reading.
    pub fn present_readings(&self) -> usize {
        self.observations
            .iter()
            .filter(|o| o.temperature.is_some())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, month: u32, day: u32, temp: Option<f64>) -> RawRow {
        RawRow { line: 0, year, month, day, temperature: temp }
    }

    #[test]
    fn test_empty_row_set_is_rejected() {
        let result = RecordStore::from_rows(Vec::new());
        assert_eq!(result, Err(DataLoadError::EmptyDataset));
    }

    #[test]
    fn test_rows_are_sorted_chronologically() {
        let store = RecordStore::from_rows(vec![
            row(1997, 6, 1, Some(70.0)),
            row(1995, 1, 15, Some(30.0)),
            row(1995, 1, 2, Some(28.0)),
        ])
        .expect("valid rows should load");

        let dates: Vec<_> = store
            .observations()
            .iter()
            .map(|o| (o.year, o.month, o.day))
            .collect();
        assert_eq!(dates, vec![(1995, 1, 2), (1995, 1, 15), (1997, 6, 1)]);
    }

    #[test]
    fn test_season_is_derived_from_month() {
        let store = RecordStore::from_rows(vec![
            row(1995, 1, 1, Some(30.0)),
            row(1995, 4, 1, Some(55.0)),
            row(1995, 7, 1, Some(80.0)),
            row(1995, 10, 1, Some(60.0)),
        ])
        .expect("valid rows should load");

        let seasons: Vec<_> = store.observations().iter().map(|o| o.season).collect();
        assert_eq!(
            seasons,
            vec![Season::Winter, Season::Spring, Season::Summer, Season::Fall]
        );
    }

    #[test]
    fn test_impossible_month_fails_load_with_no_partial_store() {
        let result = RecordStore::from_rows(vec![
            row(1995, 1, 1, Some(30.0)),
            row(1995, 13, 1, Some(30.0)),
        ]);
        assert_eq!(
            result,
            Err(DataLoadError::InvalidField {
                line: 0,
                field: "month",
                value: "13".to_string()
            })
        );
    }

    #[test]
    fn test_impossible_day_fails_load() {
        let result = RecordStore::from_rows(vec![row(1995, 1, 32, Some(30.0))]);
        assert!(matches!(
            result,
            Err(DataLoadError::InvalidField { field: "day", .. })
        ));
    }

    #[test]
    fn test_year_range_spans_first_and_last_observation() {
        let store = RecordStore::from_rows(vec![
            row(2001, 3, 3, None),
            row(1995, 1, 1, Some(30.0)),
            row(2020, 12, 31, Some(35.0)),
        ])
        .expect("valid rows should load");
        assert_eq!(store.year_range(), (1995, 2020));
    }

    #[test]
    fn test_absent_readings_are_kept_but_counted_separately() {
        let store = RecordStore::from_rows(vec![
            row(1995, 1, 1, Some(30.0)),
            row(1995, 1, 2, None),
        ])
        .expect("valid rows should load");
        assert_eq!(store.len(), 2);
        assert_eq!(store.present_readings(), 1);
    }
}
