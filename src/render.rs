/// Plain-text rendering of aggregation tables and prediction results.
///
/// The analysis modules return structured tables; this is the CLI consumer.
/// Missing buckets render as `--` in every table. Anything that needs the
/// data elsewhere (a chart layer, an HTTP API) can take the same structs as
/// JSON via `to_json`.

use serde::Serialize;

use crate::analysis::aggregate::{MonthlyDayTable, SeasonalMeans, YearlyMeans};
use crate::model::{Bucket, PredictionResult, Season};

const RULE: &str = "═══════════════════════════════════════════════════════════";

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

fn cell(bucket: &Bucket, precision: usize) -> String {
    match bucket.mean {
        Some(mean) => format!("{:.*}", precision, mean),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Aggregation tables
// ---------------------------------------------------------------------------

/// Seasonal means for one year, one row per season with its calendar span.
pub fn seasonal_table(means: &SeasonalMeans) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", RULE));
    out.push_str(&format!("Temperatures by Season — {}\n", means.year));
    out.push_str(&format!("{}\n", RULE));
    for season in Season::ALL {
        out.push_str(&format!(
            "{:<8} {:>8} °F   ({})\n",
            season.to_string(),
            cell(&means.get(season), 2),
            season.date_range_label()
        ));
    }
    out
}

/// The 31×12 mean-by-calendar-day table, days as rows, months as columns.
pub fn monthly_table(table: &MonthlyDayTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", RULE));
    out.push_str("Average Temperature by Calendar Day (°F, all years)\n");
    out.push_str(&format!("{}\n", RULE));
    out.push_str("Day");
    for abbrev in MONTH_ABBREVS {
        out.push_str(&format!("{:>7}", abbrev));
    }
    out.push('\n');
    for day in 1..=31u32 {
        out.push_str(&format!("{:>3}", day));
        for month in 1..=12u32 {
            out.push_str(&format!("{:>7}", cell(&table.cell(day, month), 1)));
        }
        out.push('\n');
    }
    out
}

/// Yearly means, one row per year in the dataset range.
pub fn yearly_table(means: &YearlyMeans) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", RULE));
    out.push_str("Yearly Average Temperatures (°F)\n");
    out.push_str(&format!("{}\n", RULE));
    for (year, bucket) in &means.means {
        out.push_str(&format!("{}  {:>8}\n", year, cell(bucket, 2)));
    }
    out
}

// ---------------------------------------------------------------------------
// Prediction summary
// ---------------------------------------------------------------------------

/// Human-readable prediction summary. Point estimate and error bound are
/// rounded to two decimals here; the result struct keeps full precision.
pub fn prediction_summary(result: &PredictionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", RULE));
    out.push_str(&format!(
        "The predicted temperature for {} {}, {} is: {:.2} +/- {:.2} °F\n",
        month_name(result.month),
        result.day,
        result.year,
        result.point_estimate,
        result.error_bound
    ));
    out.push_str(&format!(
        "Based on {} historical readings, trend {:+.3} °F/year\n",
        result.samples.len(),
        result.slope
    ));
    out.push_str(&format!("{}\n", RULE));
    out
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

/// Serializes any table or result for non-CLI consumers.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
