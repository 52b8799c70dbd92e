/// Date-bucketed mean-temperature tables.
///
/// Three aggregations, all pure functions of the record store: seasonal
/// means for one year, monthly means by day-of-month across all years, and
/// yearly means across the store's year range. Tables are dense — every
/// bucket in the grouping dimension is present, with explicit missing cells
/// where no readings exist. A missing cell is a diagnostic, never an error.

use serde::Serialize;

use crate::logging;
use crate::model::{Bucket, Season};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Missing-cell classification
// ---------------------------------------------------------------------------

/// Why an aggregation cell has no mean. Both kinds render identically as
/// missing; the kind lets callers distinguish a calendar hole from a gap in
/// the source data when diagnosing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingKind {
    /// The (month, day) combination never exists in any year, e.g. April 31.
    CalendarImpossible,
    /// The date can exist, but no year in the dataset has a reading for it.
    DataGap,
}

/// Classifies an empty (month, day) cell. February 29 classifies as a data
/// gap: the date exists in leap years, so an empty cell there reflects the
/// source, not the calendar.
pub fn classify_missing(day: u32, month: u32) -> MissingKind {
    let impossible = match month {
        4 | 6 | 9 | 11 => day == 31,
        2 => day == 30 || day == 31,
        _ => false,
    };
    if impossible {
        MissingKind::CalendarImpossible
    } else {
        MissingKind::DataGap
    }
}

// ---------------------------------------------------------------------------
// Shared mean helper
// ---------------------------------------------------------------------------

/// Mean over the present readings selected by `select`, as a bucket.
fn mean_where<F>(store: &RecordStore, select: F) -> Bucket
where
    F: Fn(&crate::model::Observation) -> bool,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for obs in store.observations() {
        if !select(obs) {
            continue;
        }
        if let Some(temp) = obs.temperature {
            sum += temp;
            count += 1;
        }
    }
    Bucket::from_sum_count(sum, count)
}

// ---------------------------------------------------------------------------
// Seasonal means
// ---------------------------------------------------------------------------

/// Mean temperature per meteorological season for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalMeans {
    pub year: i32,
    pub winter: Bucket,
    pub spring: Bucket,
    pub summer: Bucket,
    pub fall: Bucket,
}

impl SeasonalMeans {
    pub fn get(&self, season: Season) -> Bucket {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

/// Computes the four seasonal mean temperatures for `year`.
///
/// A season groups by the observation's own calendar year: the winter
/// bucket for 1995 covers December 1995 plus January–February 1995, not
/// the December of the preceding year.
pub fn seasonal_means(store: &RecordStore, year: i32) -> SeasonalMeans {
    let mean_for = |season: Season| {
        mean_where(store, |obs| obs.year == year && obs.season == season)
    };
    SeasonalMeans {
        year,
        winter: mean_for(Season::Winter),
        spring: mean_for(Season::Spring),
        summer: mean_for(Season::Summer),
        fall: mean_for(Season::Fall),
    }
}

// ---------------------------------------------------------------------------
// Monthly means by day
// ---------------------------------------------------------------------------

/// Dense 31×12 table of mean temperatures per (day, month) across all
/// years. Row = day 1–31, column = month 1–12.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDayTable {
    cells: Vec<Bucket>,
}

impl MonthlyDayTable {
    /// Cell for 1-based `day` and `month`.
    pub fn cell(&self, day: u32, month: u32) -> Bucket {
        self.cells[Self::index(day, month)]
    }

    /// Why a cell is missing; `None` when the cell has a mean.
    pub fn missing_kind(&self, day: u32, month: u32) -> Option<MissingKind> {
        if self.cell(day, month).is_missing() {
            Some(classify_missing(day, month))
        } else {
            None
        }
    }

    fn index(day: u32, month: u32) -> usize {
        debug_assert!((1..=31).contains(&day) && (1..=12).contains(&month));
        ((day - 1) * 12 + (month - 1)) as usize
    }
}

/// Computes the full per-calendar-day mean table across all years.
///
/// Calendar-impossible cells (day 31 of a 30-day month, February 30/31)
/// are logged as informational diagnostics — expected holes, not data
/// problems.
pub fn monthly_day_means(store: &RecordStore) -> MonthlyDayTable {
    let mut cells = Vec::with_capacity(31 * 12);
    for day in 1..=31u32 {
        for month in 1..=12u32 {
            let bucket = mean_where(store, |obs| obs.day == day && obs.month == month);
            if bucket.is_missing()
                && classify_missing(day, month) == MissingKind::CalendarImpossible
            {
                logging::log_calendar_gap(day, month);
            }
            cells.push(bucket);
        }
    }
    MonthlyDayTable { cells }
}

// ---------------------------------------------------------------------------
// Yearly means
// ---------------------------------------------------------------------------

/// Mean temperature per year over the store's inclusive year range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMeans {
    pub means: Vec<(i32, Bucket)>,
}

impl YearlyMeans {
    pub fn get(&self, year: i32) -> Option<Bucket> {
        self.means
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, bucket)| *bucket)
    }
}

/// Computes the mean temperature for every year in the store's range,
/// dense with explicit gaps for years that have no present readings.
pub fn yearly_means(store: &RecordStore) -> YearlyMeans {
    let (first, last) = store.year_range();
    let means = (first..=last)
        .map(|year| (year, mean_where(store, |obs| obs.year == year)))
        .collect();
    YearlyMeans { means }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
