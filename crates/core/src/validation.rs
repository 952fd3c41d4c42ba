//! Input clamping for numeric answers.
//!
//! Numeric fields are entered as free text. Instead of rejecting out-of-range input, the
//! values are coerced into their legal range the moment they enter the model.

use crate::constants::{DAYS_PER_WEEK_MAX, HOURS_PER_WEEK_MAX};

/// Parses a days-per-week answer and clamps it to `0..=7`.
///
/// Parsing takes the leading integer prefix of the trimmed input (an optional sign followed by
/// digits), so `"5 días"` reads as 5. Input without any leading digits reads as 0.
///
/// Returns `None` when the input is blank, meaning "unanswered".
pub fn clamp_days_per_week(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = parse_integer_prefix(trimmed).unwrap_or(0);
    Some(value.clamp(0, i64::from(DAYS_PER_WEEK_MAX)) as u8)
}

/// Parses an hours-per-week answer and clamps it to `0..=168`.
///
/// Fractional hours are kept (`"2.5"` stays 2.5). Non-numeric input reads as 0.
///
/// Returns `None` when the input is blank.
pub fn clamp_hours_per_week(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    Some(value.clamp(0.0, HOURS_PER_WEEK_MAX))
}

/// Clamps a days-per-week answer held as text, as the top-level habit fields store it.
///
/// Blank input stays blank.
pub fn clamp_days_text(input: &str) -> String {
    clamp_days_per_week(input)
        .map(|days| days.to_string())
        .unwrap_or_default()
}

fn parse_integer_prefix(input: &str) -> Option<i64> {
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let prefix_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if prefix_len == 0 {
        return None;
    }

    let magnitude = digits[..prefix_len]
        .bytes()
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_are_clamped_into_range() {
        assert_eq!(clamp_days_per_week("9"), Some(7));
        assert_eq!(clamp_days_per_week("-3"), Some(0));
        assert_eq!(clamp_days_per_week("4"), Some(4));
        assert_eq!(clamp_days_per_week("99999999999999999999999"), Some(7));
    }

    #[test]
    fn blank_days_stay_unanswered() {
        assert_eq!(clamp_days_per_week(""), None);
        assert_eq!(clamp_days_per_week("   "), None);
    }

    #[test]
    fn days_take_leading_integer() {
        assert_eq!(clamp_days_per_week("5 días"), Some(5));
        assert_eq!(clamp_days_per_week("3.9"), Some(3));
        assert_eq!(clamp_days_per_week("abc"), Some(0));
    }

    #[test]
    fn hours_keep_fractions_and_clamp() {
        assert_eq!(clamp_hours_per_week("2.5"), Some(2.5));
        assert_eq!(clamp_hours_per_week("500"), Some(168.0));
        assert_eq!(clamp_hours_per_week("-1"), Some(0.0));
        assert_eq!(clamp_hours_per_week("mucho"), Some(0.0));
        assert_eq!(clamp_hours_per_week(""), None);
    }

    #[test]
    fn days_text_round_trips_through_clamp() {
        assert_eq!(clamp_days_text("12"), "7");
        assert_eq!(clamp_days_text(""), "");
    }
}
