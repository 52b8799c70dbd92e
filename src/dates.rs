/// Calendar validation for prediction-date input.
///
/// Rejects calendar-impossible (day, month, year) combinations before any
/// prediction work runs. Checks are ordered and short-circuit at the first
/// failure; every violation is reported, never silently corrected.
///
/// The leap-year test is the direct Gregorian rule rather than a
/// precomputed table, so it stays correct at arbitrary year ranges.

use serde::Deserialize;

use crate::model::DateError;

/// Months with 30 days, where day 31 never exists.
const SHORT_MONTHS: [u32; 4] = [4, 6, 9, 11];

/// Inclusive year range accepted for predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PredictionYears {
    pub min: i32,
    pub max: i32,
}

impl Default for PredictionYears {
    fn default() -> Self {
        PredictionYears { min: 2021, max: 3000 }
    }
}

/// Gregorian leap-year rule: divisible by 4, except century years unless
/// also divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Validates a prediction date, short-circuiting at the first failure:
///
/// 1. year outside `years` → `OutOfRange`
/// 2. day 31 in a 30-day month → `InvalidDay`
/// 3. February 30/31 → `InvalidDay`
/// 4. February 29 in a non-leap year → `NotLeapYear`
///
/// Month and day fields outside 1–12 / 1–31 are reported as `InvalidDay`.
pub fn validate(day: u32, month: u32, year: i32, years: &PredictionYears) -> Result<(), DateError> {
    if year < years.min || year > years.max {
        return Err(DateError::OutOfRange { year, min: years.min, max: years.max });
    }

    if month < 1 || month > 12 || day < 1 || day > 31 {
        return Err(DateError::InvalidDay { month, day });
    }

    if SHORT_MONTHS.contains(&month) && day == 31 {
        return Err(DateError::InvalidDay { month, day });
    }

    if month == 2 {
        if day == 30 || day == 31 {
            return Err(DateError::InvalidDay { month, day });
        }
        if day == 29 && !is_leap_year(year) {
            return Err(DateError::NotLeapYear { year });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn full_range() -> PredictionYears {
        // Wide enough to exercise historical leap-year cases directly.
        PredictionYears { min: 1, max: 3000 }
    }

    // --- Leap-year rule -----------------------------------------------------

    #[test]
    fn test_years_divisible_by_four_are_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(1996));
    }

    #[test]
    fn test_century_years_are_not_leap_years_unless_divisible_by_400() {
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(3000));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
    }

    #[test]
    fn test_ordinary_years_are_not_leap_years() {
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1995));
    }

    // --- Validation rules ---------------------------------------------------

    #[test]
    fn test_february_29_in_leap_year_is_valid() {
        assert_eq!(validate(29, 2, 2000, &full_range()), Ok(()));
        assert_eq!(validate(29, 2, 2024, &full_range()), Ok(()));
    }

    #[test]
    fn test_february_29_in_non_leap_century_is_rejected() {
        assert_eq!(
            validate(29, 2, 1900, &full_range()),
            Err(DateError::NotLeapYear { year: 1900 })
        );
    }

    #[test]
    fn test_february_30_and_31_are_invalid_in_every_year() {
        for year in [2021, 2024, 2100, 3000] {
            assert_eq!(
                validate(30, 2, year, &full_range()),
                Err(DateError::InvalidDay { month: 2, day: 30 }),
                "February 30 must be invalid in {}",
                year
            );
            assert_eq!(
                validate(31, 2, year, &full_range()),
                Err(DateError::InvalidDay { month: 2, day: 31 }),
                "February 31 must be invalid in {}",
                year
            );
        }
    }

    #[test]
    fn test_day_31_is_invalid_in_every_short_month() {
        for month in SHORT_MONTHS {
            for year in [2021, 2500, 3000] {
                assert_eq!(
                    validate(31, month, year, &full_range()),
                    Err(DateError::InvalidDay { month, day: 31 }),
                    "day 31 of month {} must be invalid in {}",
                    month,
                    year
                );
            }
        }
    }

    #[test]
    fn test_day_30_is_valid_in_short_months() {
        assert_eq!(validate(30, 4, 2021, &full_range()), Ok(()));
        assert_eq!(validate(30, 11, 2999, &full_range()), Ok(()));
    }

    #[test]
    fn test_year_outside_supported_range_is_rejected_first() {
        let years = PredictionYears::default();
        // February 31 of 2020 fails on the year check, not the day check —
        // the range rule is evaluated before any calendar rule.
        assert_eq!(
            validate(31, 2, 2020, &years),
            Err(DateError::OutOfRange { year: 2020, min: 2021, max: 3000 })
        );
        assert_eq!(
            validate(1, 1, 3001, &years),
            Err(DateError::OutOfRange { year: 3001, min: 2021, max: 3000 })
        );
    }

    #[test]
    fn test_default_prediction_range_bounds_are_inclusive() {
        let years = PredictionYears::default();
        assert_eq!(validate(1, 1, 2021, &years), Ok(()));
        assert_eq!(validate(1, 1, 3000, &years), Ok(()));
    }

    #[test]
    fn test_out_of_range_month_and_day_fields_are_invalid() {
        assert_eq!(
            validate(1, 13, 2021, &full_range()),
            Err(DateError::InvalidDay { month: 13, day: 1 })
        );
        assert_eq!(
            validate(0, 1, 2021, &full_range()),
            Err(DateError::InvalidDay { month: 1, day: 0 })
        );
        assert_eq!(
            validate(32, 1, 2021, &full_range()),
            Err(DateError::InvalidDay { month: 1, day: 32 })
        );
    }
}
