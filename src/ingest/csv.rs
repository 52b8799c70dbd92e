/// City daily-temperature CSV parsing.
///
/// The source format is the per-city daily average temperature export:
/// a header row naming at least `Month`, `Day`, `Year`, `AvgTemperature`
/// (column order varies between exports, so indices come from the header),
/// then one row per calendar day. A reading of `-99` is the dataset's
/// missing-value sentinel and maps to an absent temperature.

use crate::config::DatasetSource;
use crate::model::{DataLoadError, RawRow};

/// Missing-reading sentinel used by the source dataset.
const MISSING_SENTINEL: f64 = -99.0;

/// Parses the full CSV text into raw rows.
///
/// Header matching is case-insensitive. Blank lines are skipped; rows with
/// fewer fields than the header are malformed and fail the load (no partial
/// result). Temperature fields that are empty, unparseable, or equal to the
/// `-99` sentinel become `None`.
pub fn parse_temperature_csv(text: &str) -> Result<Vec<RawRow>, DataLoadError> {
    let mut lines = text.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => return Err(DataLoadError::EmptyDataset),
        }
    };

    let columns: Vec<String> = header
        .split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();
    let index_of = |name: &'static str| -> Result<usize, DataLoadError> {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or(DataLoadError::MissingField(name))
    };
    let month_idx = index_of("month")?;
    let day_idx = index_of("day")?;
    let year_idx = index_of("year")?;
    let temp_idx = index_of("avgtemperature")?;

    // Helper to parse readings that may carry the missing sentinel.
    let parse_reading = |s: &str| -> Option<f64> {
        let value: f64 = s.trim().parse().ok()?;
        if value == MISSING_SENTINEL {
            None
        } else {
            Some(value)
        }
    };

    let mut rows = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = i + 1;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < columns.len() {
            return Err(DataLoadError::InvalidField {
                line: line_number,
                field: "row",
                value: line.to_string(),
            });
        }

        let month: u32 = parse_int(fields[month_idx], "month", line_number)?;
        let day: u32 = parse_int(fields[day_idx], "day", line_number)?;
        let year: i32 = fields[year_idx].trim().parse().map_err(|_| {
            DataLoadError::InvalidField {
                line: line_number,
                field: "year",
                value: fields[year_idx].trim().to_string(),
            }
        })?;
        let temperature = parse_reading(fields[temp_idx]);

        rows.push(RawRow { line: line_number, year, month, day, temperature });
    }

    if rows.is_empty() {
        return Err(DataLoadError::EmptyDataset);
    }
    Ok(rows)
}

fn parse_int(field: &str, name: &'static str, line: usize) -> Result<u32, DataLoadError> {
    field.trim().parse().map_err(|_| DataLoadError::InvalidField {
        line,
        field: name,
        value: field.trim().to_string(),
    })
}

/// Fetches the dataset CSV from an HTTP(S) source.
pub fn fetch_csv(url: &str) -> Result<String, DataLoadError> {
    let response = reqwest::blocking::get(url).map_err(|e| DataLoadError::Http(e.to_string()))?;
    if !response.status().is_success() {
        return Err(DataLoadError::Http(format!("{} for {}", response.status(), url)));
    }
    response.text().map_err(|e| DataLoadError::Http(e.to_string()))
}

/// Loads and parses the dataset from the configured source.
pub fn load_dataset(source: &DatasetSource) -> Result<Vec<RawRow>, DataLoadError> {
    let text = match source {
        DatasetSource::File(path) => {
            std::fs::read_to_string(path).map_err(|e| DataLoadError::Io(format!("{}: {}", path, e)))?
        }
        DatasetSource::Url(url) => fetch_csv(url)?,
    };
    parse_temperature_csv(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
