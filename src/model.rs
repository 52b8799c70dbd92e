/// Core data types for the Indianapolis temperature dashboard service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no external dependencies beyond serde derives —
/// only types and the small pure functions that belong to them.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Dataset bounds
// ---------------------------------------------------------------------------

/// First year present in the loaded daily-temperature dataset.
pub const DATASET_START_YEAR: i32 = 1995;

/// Last year present in the loaded daily-temperature dataset.
pub const DATASET_END_YEAR: i32 = 2020;

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// Meteorological season, derived from the month and never stored
/// independently of it.
///
/// Boundaries follow the meteorological (not astronomical) definition:
///   winter: December–February, spring: March–May,
///   summer: June–August, fall: September–November.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in dashboard display order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Derives the season for a calendar month (1–12).
    /// Returns `None` for a month outside 1–12.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Fall),
            _ => None,
        }
    }

    /// Calendar span covered by this season, for table footnotes.
    pub fn date_range_label(&self) -> &'static str {
        match self {
            Season::Winter => "December 1 - February 28/29",
            Season::Spring => "March 1 - May 31",
            Season::Summer => "June 1 - August 31",
            Season::Fall => "September 1 - November 30",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observations
// ---------------------------------------------------------------------------

/// One row of the source dataset after parsing, before store validation.
///
/// Produced by `ingest::csv` from the raw CSV text. `temperature` is `None`
/// when the source carried its missing-reading sentinel or no value at all.
/// `line` is the 1-based source line, kept for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: usize,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub temperature: Option<f64>,
}

/// A single daily weather observation, immutable after store construction.
///
/// `temperature` is the average temperature for the day in °F; `None` means
/// the station reported no valid reading for that date. The season is
/// derived from the month at load time via `Season::from_month`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub temperature: Option<f64>,
    pub season: Season,
}

// ---------------------------------------------------------------------------
// Aggregation buckets
// ---------------------------------------------------------------------------

/// One aggregation cell: the mean temperature over all present readings in
/// the bucket, or missing when the bucket had no present readings.
///
/// A missing bucket is never a silent zero. For numeric consumers that want
/// a uniform float column (plotting layers treat NaN as "no point"),
/// `as_f64` maps missing to NaN; `is_missing` is the structured flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    pub mean: Option<f64>,
}

impl Bucket {
    /// Builds a bucket from an accumulated sum and count of present
    /// readings. A zero count yields a missing bucket — division by a zero
    /// count must never occur.
    pub fn from_sum_count(sum: f64, count: usize) -> Bucket {
        if count == 0 {
            Bucket { mean: None }
        } else {
            Bucket { mean: Some(sum / count as f64) }
        }
    }

    pub fn is_missing(&self) -> bool {
        self.mean.is_none()
    }

    /// The mean as a plain float, NaN when missing.
    pub fn as_f64(&self) -> f64 {
        self.mean.unwrap_or(f64::NAN)
    }
}

// ---------------------------------------------------------------------------
// Prediction results
// ---------------------------------------------------------------------------

/// Outcome of a temperature prediction for one future calendar date.
///
/// Computed on demand per request, not cached. All fields carry full
/// precision; rounding to two decimals happens in the presentation layer.
/// `samples` holds the historical `(year, temperature)` pairs the fit was
/// based on, so a rendering layer can draw the scatter and fitted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// Fitted value of the regression line at the requested year, in °F.
    pub point_estimate: f64,
    /// Root-mean-square residual of the fit over the historical samples.
    pub error_bound: f64,
    /// OLS slope, in °F per year.
    pub slope: f64,
    /// OLS intercept, in °F at year zero.
    pub intercept: f64,
    pub samples: Vec<(i32, f64)>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while loading the dataset into the record store.
/// Fatal to store construction — no partial store is ever returned.
#[derive(Debug, PartialEq)]
pub enum DataLoadError {
    /// The source contained no data rows at all.
    EmptyDataset,
    /// A required column was absent from the source header.
    MissingField(&'static str),
    /// A field failed to parse or was out of range.
    InvalidField { line: usize, field: &'static str, value: String },
    /// Non-2xx HTTP response while fetching a remote dataset.
    Http(String),
    /// Filesystem error while reading a local dataset.
    Io(String),
}

impl std::fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadError::EmptyDataset => write!(f, "dataset contains no data rows"),
            DataLoadError::MissingField(field) => {
                write!(f, "required column '{}' missing from dataset header", field)
            }
            DataLoadError::InvalidField { line, field, value } => {
                write!(f, "line {}: invalid {} value '{}'", line, field, value)
            }
            DataLoadError::Http(msg) => write!(f, "HTTP error fetching dataset: {}", msg),
            DataLoadError::Io(msg) => write!(f, "I/O error reading dataset: {}", msg),
        }
    }
}

impl std::error::Error for DataLoadError {}

/// User-input date validation failures. Recoverable — reported back as a
/// structured rejection, no computation proceeds.
#[derive(Debug, PartialEq)]
pub enum DateError {
    /// The year falls outside the supported prediction range.
    OutOfRange { year: i32, min: i32, max: i32 },
    /// The day does not exist in the given month in any year.
    InvalidDay { month: u32, day: u32 },
    /// February 29 in a year that is not a leap year.
    NotLeapYear { year: i32 },
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateError::OutOfRange { year, min, max } => {
                write!(f, "year {} is outside the supported range {}-{}", year, min, max)
            }
            DateError::InvalidDay { month, day } => {
                write!(f, "month {} does not have {} days", month, day)
            }
            DateError::NotLeapYear { year } => {
                write!(f, "{} is not a leap year", year)
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Errors that prevent fitting a regression. The caller may still display
/// the historical data points alone.
#[derive(Debug, PartialEq)]
pub enum PredictionError {
    /// Fewer than 2 historical samples exist for the requested calendar
    /// day — a line cannot be fit through fewer than 2 points.
    InsufficientData { samples: usize },
    /// The year dimension of the samples has zero variance, so the slope
    /// is undefined.
    DegenerateInput,
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::InsufficientData { samples } => {
                write!(f, "only {} historical sample(s) for this calendar day; need at least 2", samples)
            }
            PredictionError::DegenerateInput => {
                write!(f, "historical samples have zero variance in the year dimension")
            }
        }
    }
}

impl std::error::Error for PredictionError {}

/// Credential backend failures. Distinct from a plain "wrong password",
/// which is an ordinary `false` from the access gate.
#[derive(Debug)]
pub enum AuthError {
    /// A required environment variable was not set.
    MissingEnv(&'static str),
    /// The database rejected a connection or query.
    Database(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingEnv(var) => write!(f, "environment variable {} is not set", var),
            AuthError::Database(msg) => write!(f, "credential store error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
