// src/core/scoring.rs

//! Pure computations over practice data: percentages, durations and answer matching.

use chrono::{DateTime, Utc};

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals. Zero when `whole` is zero.
pub fn ratio_percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Same as [`ratio_percentage`] for collection sizes.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Whole minutes elapsed between two instants, truncated toward zero.
pub fn duration_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> i64 {
    (ended_at - started_at).num_minutes()
}

/// Canonical form used to compare a typed answer with the stored one.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed comparison.
pub fn answers_match(expected: &str, given: &str) -> bool {
    normalize_answer(expected) == normalize_answer(given)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ratio_percentage_edges() {
        assert_eq!(ratio_percentage(0, 0), 0.0);
        assert_eq!(ratio_percentage(4, 4), 100.0);
        assert_eq!(ratio_percentage(5, 7), 71.43);
        assert_eq!(ratio_percentage(1, 3), 33.33);
    }

    #[test]
    fn test_percentage_for_counts() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(2, 3), 66.67);
    }

    #[test]
    fn test_duration_minutes_half_hour() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(duration_minutes(start, end), 30);
    }

    #[test]
    fn test_duration_minutes_truncates_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 10, 1, 59).unwrap();
        assert_eq!(duration_minutes(start, end), 1);
    }

    #[test]
    fn test_answers_match_ignores_case_and_padding() {
        for given in ["Paris", " paris ", "PARIS", "\tParis\n"] {
            assert!(answers_match("Paris", given), "'{}' should match", given);
        }
        assert!(!answers_match("Paris", "Lyon"));
        assert!(!answers_match("Paris", "Par is"));
    }
}
