//! Raw text input to clamped configuration values.
//!
//! Geometry functions assume a valid configuration, so every text field the
//! user can type into goes through one of these helpers first. Parsing is
//! lenient: a leading number is taken and trailing garbage ignored
//! (`"12in"` reads as 12). Anything unreadable becomes the field's fallback.
//!
//! The `clamp_*` helpers do the same for values that arrive already numeric
//! (JSON request bodies). Counts and lengths never exceed
//! [`MAX_GRID_CELLS`]; whether the whole quilt fits is a separate check on
//! the grid extents.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::constants::MAX_GRID_CELLS;

/// Default width of fabric in inches.
pub const DEFAULT_WOF: f64 = 42.0;

/// Block count: leading integer, fallback and minimum 1.
#[must_use]
pub fn parse_count(text: &str) -> u32 {
    leading_int(text).map_or(1, |n| clamp_count(n as f64))
}

/// Block width or height: whole inches, fallback and minimum 1.
#[must_use]
pub fn parse_block_length(text: &str) -> f64 {
    leading_int(text).map_or(1.0, |n| clamp_block_length(n as f64))
}

/// Sashing, sashing border or border width: whole inches, fallback and minimum 0.
#[must_use]
pub fn parse_frame_width(text: &str) -> f64 {
    leading_int(text).map_or(0.0, |n| clamp_frame_width(n as f64))
}

/// Block count from a number: fractions truncate, minimum 1.
#[must_use]
pub fn clamp_count(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.min(MAX_GRID_CELLS as f64) as u32
    } else {
        1
    }
}

/// Block width or height from a number: minimum 1, fractions kept.
#[must_use]
pub fn clamp_block_length(value: f64) -> f64 {
    if value.is_finite() && value >= 1.0 {
        value.min(MAX_GRID_CELLS as f64)
    } else {
        1.0
    }
}

/// Frame width from a number: minimum 0, fractions kept.
#[must_use]
pub fn clamp_frame_width(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_GRID_CELLS as f64)
    } else {
        0.0
    }
}

/// Width of fabric: must be positive, fallback 42.
#[must_use]
pub fn parse_wof(text: &str) -> f64 {
    match leading_float(text) {
        Some(v) if v > 0.0 => v,
        _ => DEFAULT_WOF,
    }
}

/// Seam allowance or strip cut width: non-negative, fallback 0.
#[must_use]
pub fn parse_non_negative(text: &str) -> f64 {
    match leading_float(text) {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

/// Fabric repeat size: only positive values are accepted.
#[must_use]
pub fn parse_repeat(text: &str) -> Option<f64> {
    leading_float(text).filter(|v| *v > 0.0)
}

/// Reads an optional sign followed by decimal digits.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

/// Reads the longest prefix that is a finite decimal number.
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    (1..=end)
        .rev()
        .filter_map(|len| text[..len].parse::<f64>().ok())
        .find(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), 4);
        assert_eq!(parse_count(" 7 blocks"), 7);
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("abc"), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("-3"), 1);
        assert_eq!(parse_count("2.9"), 2);
    }

    #[test]
    fn test_parse_lengths() {
        assert_eq!(parse_block_length("12in"), 12.0);
        assert_eq!(parse_block_length("x"), 1.0);
        assert_eq!(parse_frame_width("3"), 3.0);
        assert_eq!(parse_frame_width(""), 0.0);
        assert_eq!(parse_frame_width("-2"), 0.0);
    }

    #[test]
    fn test_parse_caps_at_grid_limit() {
        assert_eq!(parse_count("99999999999"), 1000);
        assert_eq!(parse_block_length("123456789"), 1000.0);
        assert_eq!(parse_frame_width("5000"), 1000.0);
    }

    #[test]
    fn test_clamp_numbers() {
        assert_eq!(clamp_count(4.0), 4);
        assert_eq!(clamp_count(2.9), 2);
        assert_eq!(clamp_count(0.0), 1);
        assert_eq!(clamp_count(1e21), 1000);
        assert_eq!(clamp_count(f64::NAN), 1);

        assert_eq!(clamp_block_length(10.5), 10.5);
        assert_eq!(clamp_block_length(0.25), 1.0);
        assert_eq!(clamp_block_length(f64::INFINITY), 1.0);

        assert_eq!(clamp_frame_width(1.5), 1.5);
        assert_eq!(clamp_frame_width(-3.0), 0.0);
        assert_eq!(clamp_frame_width(1e300), 1000.0);
    }

    #[test]
    fn test_parse_wof() {
        assert_eq!(parse_wof("44"), 44.0);
        assert_eq!(parse_wof("40.5\""), 40.5);
        assert_eq!(parse_wof("0"), DEFAULT_WOF);
        assert_eq!(parse_wof("wide"), DEFAULT_WOF);
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("0.25"), 0.25);
        assert_eq!(parse_non_negative(".375"), 0.375);
        assert_eq!(parse_non_negative("-1"), 0.0);
        assert_eq!(parse_non_negative("1e"), 1.0);
        assert_eq!(parse_non_negative("nan"), 0.0);
    }

    #[test]
    fn test_parse_repeat() {
        assert_eq!(parse_repeat("6"), Some(6.0));
        assert_eq!(parse_repeat("4.5"), Some(4.5));
        assert_eq!(parse_repeat("0"), None);
        assert_eq!(parse_repeat(""), None);
    }
}
