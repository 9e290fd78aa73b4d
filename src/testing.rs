//! Testing helpers.

use assert_float_eq::*;

use crate::domain::{MatchRecord, MinuteField, Score};

/// A record with textual minute cells; an empty string stands for a missing cell.
pub fn record(
    home: &str,
    away: &str,
    full_time: Score,
    half_time: Score,
    home_minutes: &str,
    away_minutes: &str,
) -> MatchRecord {
    let cell = |text: &str| {
        if text.is_empty() {
            MinuteField::Missing
        } else {
            MinuteField::from(text)
        }
    };
    MatchRecord::new(home, away, full_time, half_time, cell(home_minutes), cell(away_minutes))
}

pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, epsilon);
        }
    }
}
