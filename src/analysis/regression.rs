/// Same-calendar-day temperature prediction.
///
/// Fits a single-predictor ordinary-least-squares line through the
/// `(year, temperature)` samples observed on one calendar day across the
/// dataset's history, then evaluates the line at the requested future year.
/// The error bound is the root-mean-square residual of the fit, with each
/// residual taken at the sample's own year.
///
/// This is deliberately not a general forecasting model: one predictor
/// (year), one response (temperature), one calendar day.

use crate::model::{PredictionError, PredictionResult};
use crate::store::RecordStore;

/// Minimum samples for a meaningful fit — a line needs 2 points.
pub const MIN_SAMPLES: usize = 2;

/// Collects the `(year, temperature)` pairs for one calendar day across
/// all years with a present reading, in chronological order.
pub fn collect_samples(store: &RecordStore, day: u32, month: u32) -> Vec<(i32, f64)> {
    store
        .observations()
        .iter()
        .filter(|obs| obs.month == month && obs.day == day)
        .filter_map(|obs| obs.temperature.map(|temp| (obs.year, temp)))
        .collect()
}

/// Predicts the temperature for (day, month) of a future `year`.
///
/// The caller is responsible for validating the date first (`dates::validate`);
/// this function only cares whether a line can be fit through the history.
pub fn predict(
    store: &RecordStore,
    day: u32,
    month: u32,
    year: i32,
) -> Result<PredictionResult, PredictionError> {
    let samples = collect_samples(store, day, month);
    if samples.len() < MIN_SAMPLES {
        return Err(PredictionError::InsufficientData { samples: samples.len() });
    }

    let n = samples.len() as f64;
    let mean_year = samples.iter().map(|(y, _)| *y as f64).sum::<f64>() / n;
    let mean_temp = samples.iter().map(|(_, t)| *t).sum::<f64>() / n;

    let mut sum_of_squares = 0.0;
    let mut sum_of_products = 0.0;
    for (sample_year, temp) in &samples {
        let year_diff = *sample_year as f64 - mean_year;
        sum_of_squares += year_diff * year_diff;
        sum_of_products += year_diff * (temp - mean_temp);
    }

    // All samples from the same year: the slope is undefined.
    if sum_of_squares == 0.0 {
        return Err(PredictionError::DegenerateInput);
    }

    let slope = sum_of_products / sum_of_squares;
    let intercept = mean_temp - slope * mean_year;
    let point_estimate = slope * year as f64 + intercept;

    let mean_squared_residual = samples
        .iter()
        .map(|(sample_year, temp)| {
            let fitted = slope * *sample_year as f64 + intercept;
            (temp - fitted) * (temp - fitted)
        })
        .sum::<f64>()
        / n;
    let error_bound = mean_squared_residual.sqrt();

    Ok(PredictionResult {
        day,
        month,
        year,
        point_estimate,
        error_bound,
        slope,
        intercept,
        samples,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawRow;

    fn row(year: i32, month: u32, day: u32, temp: Option<f64>) -> RawRow {
        RawRow { line: 0, year, month, day, temperature: temp }
    }

    fn store_of(rows: Vec<RawRow>) -> RecordStore {
        RecordStore::from_rows(rows).expect("fixture rows should load")
    }

    const TOLERANCE: f64 = 1e-9;

    // --- Sample collection --------------------------------------------------

    #[test]
    fn test_samples_are_restricted_to_the_requested_calendar_day() {
        let store = store_of(vec![
            row(1995, 7, 4, Some(85.0)),
            row(1995, 7, 5, Some(90.0)),
            row(1996, 7, 4, Some(86.0)),
            row(1996, 6, 4, Some(75.0)),
        ]);
        let samples = collect_samples(&store, 4, 7);
        assert_eq!(samples, vec![(1995, 85.0), (1996, 86.0)]);
    }

    #[test]
    fn test_absent_readings_do_not_become_samples() {
        let store = store_of(vec![
            row(1995, 7, 4, Some(85.0)),
            row(1996, 7, 4, None),
            row(1997, 7, 4, Some(87.0)),
        ]);
        let samples = collect_samples(&store, 4, 7);
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|(y, _)| *y != 1996));
    }

    // --- Guard conditions ---------------------------------------------------

    #[test]
    fn test_zero_samples_is_insufficient_data() {
        let store = store_of(vec![row(1995, 1, 1, Some(30.0))]);
        let result = predict(&store, 4, 7, 2030);
        assert_eq!(result, Err(PredictionError::InsufficientData { samples: 0 }));
    }

    #[test]
    fn test_one_sample_is_insufficient_data() {
        let store = store_of(vec![row(1995, 7, 4, Some(85.0))]);
        let result = predict(&store, 4, 7, 2030);
        assert_eq!(result, Err(PredictionError::InsufficientData { samples: 1 }));
    }

    #[test]
    fn test_samples_all_in_one_year_are_degenerate() {
        // Duplicate source rows for the same date leave the year dimension
        // with zero variance.
        let store = store_of(vec![
            row(1995, 7, 4, Some(85.0)),
            row(1995, 7, 4, Some(86.0)),
        ]);
        let result = predict(&store, 4, 7, 2030);
        assert_eq!(result, Err(PredictionError::DegenerateInput));
    }

    // --- Fit correctness ----------------------------------------------------

    #[test]
    fn test_two_samples_fit_exactly_through_both_points() {
        let store = store_of(vec![
            row(2000, 7, 4, Some(80.0)),
            row(2010, 7, 4, Some(90.0)),
        ]);
        let result = predict(&store, 4, 7, 2020).expect("two samples should fit");

        // The line through (2000, 80) and (2010, 90) has slope 1.0 and
        // passes through (2020, 100) with zero residual at both samples.
        assert!((result.slope - 1.0).abs() < TOLERANCE);
        assert!((result.point_estimate - 100.0).abs() < TOLERANCE);
        assert!(
            result.error_bound.abs() < TOLERANCE,
            "two-point fit must have zero residual, got {}",
            result.error_bound
        );
    }

    #[test]
    fn test_perfectly_linear_history_predicts_on_the_line() {
        // temp = 50 + 0.1 * (year - 1995) for every year 1995..=2020.
        let rows = (1995..=2020)
            .map(|year| row(year, 7, 4, Some(50.0 + 0.1 * (year - 1995) as f64)))
            .collect();
        let store = store_of(rows);
        let result = predict(&store, 4, 7, 2030).expect("linear history should fit");

        assert!(
            (result.point_estimate - 53.5).abs() < 1e-6,
            "expected ~53.5, got {}",
            result.point_estimate
        );
        assert!(
            result.error_bound < 1e-6,
            "perfect line must have ~zero error bound, got {}",
            result.error_bound
        );
    }

    #[test]
    fn test_constant_history_predicts_the_constant() {
        let rows = (1995..=2000).map(|year| row(year, 1, 15, Some(28.0))).collect();
        let store = store_of(rows);
        let result = predict(&store, 15, 1, 2050).expect("constant history should fit");
        assert!((result.slope).abs() < TOLERANCE);
        assert!((result.point_estimate - 28.0).abs() < TOLERANCE);
        assert!(result.error_bound.abs() < TOLERANCE);
    }

    #[test]
    fn test_error_bound_is_rms_of_residuals_at_each_samples_own_year() {
        // Samples: (2000, 10), (2002, 10), (2004, 16).
        // mean_year = 2002, mean_temp = 12, slope = 1.5, intercept puts the
        // line at 9/12/15 for the three years, residuals 1, -2, 1.
        let store = store_of(vec![
            row(2000, 3, 10, Some(10.0)),
            row(2002, 3, 10, Some(10.0)),
            row(2004, 3, 10, Some(16.0)),
        ]);
        let result = predict(&store, 10, 3, 2030).expect("three samples should fit");
        let expected_rms = (6.0f64 / 3.0).sqrt();
        assert!(
            (result.error_bound - expected_rms).abs() < TOLERANCE,
            "expected RMS {}, got {}",
            expected_rms,
            result.error_bound
        );
    }

    #[test]
    fn test_negative_fahrenheit_values_are_ordinary_inputs() {
        let store = store_of(vec![
            row(1995, 1, 20, Some(-5.0)),
            row(1996, 1, 20, Some(-7.0)),
            row(1997, 1, 20, Some(-9.0)),
        ]);
        let result = predict(&store, 20, 1, 2000).expect("negative temps should fit");
        assert!((result.slope - (-2.0)).abs() < TOLERANCE);
        assert!((result.point_estimate - (-15.0)).abs() < TOLERANCE);
    }

    #[test]
    fn test_full_precision_is_retained_in_the_result() {
        let store = store_of(vec![
            row(1995, 5, 5, Some(60.123)),
            row(1996, 5, 5, Some(61.456)),
            row(1998, 5, 5, Some(62.789)),
        ]);
        let result = predict(&store, 5, 5, 2025).expect("three samples should fit");
        // Rounding belongs to the presentation layer; the result itself
        // carries more than two decimals of precision.
        let rounded = (result.point_estimate * 100.0).round() / 100.0;
        assert_ne!(result.point_estimate, rounded);
    }
}
