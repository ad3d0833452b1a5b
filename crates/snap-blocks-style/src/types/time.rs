//! CSS `<time>` values.

use std::time::Duration;

use crate::{Error, Result};

/// Parse a CSS time such as `300ms` or `0.3s` into a [`Duration`].
///
/// Units are matched case-insensitively and surrounding whitespace is
/// ignored. Anything that is not a non-negative finite number followed by
/// `ms` or `s` is rejected rather than treated as zero.
///
/// # Example
///
/// ```
/// use snap_blocks_style::types::parse_time;
/// use std::time::Duration;
///
/// assert_eq!(parse_time("300ms").unwrap(), Duration::from_millis(300));
/// assert_eq!(parse_time(" 0.3S ").unwrap(), Duration::from_millis(300));
/// assert!(parse_time("300x").is_err());
/// ```
pub fn parse_time(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();

    let (amount, millis_per_unit) = if let Some(amount) = lower.strip_suffix("ms") {
        (amount, 1.0)
    } else if let Some(amount) = lower.strip_suffix('s') {
        (amount, 1000.0)
    } else {
        return Err(Error::invalid_time(
            value,
            "time did not end with 'ms' or 's'",
        ));
    };

    let amount = amount.trim();
    let number: f64 = amount
        .parse()
        .map_err(|_| Error::invalid_time(value, format!("'{amount}' is not a number")))?;
    if !number.is_finite() || number < 0.0 {
        return Err(Error::invalid_time(
            value,
            "time must be a non-negative finite number",
        ));
    }

    let millis = number * millis_per_unit;
    Ok(Duration::from_micros((millis * 1000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milliseconds_and_seconds_agree() {
        assert_eq!(parse_time("300ms").unwrap(), parse_time("0.3s").unwrap());
        assert_eq!(parse_time("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_time("0ms").unwrap(), Duration::ZERO);
    }

    #[test]
    fn units_are_case_insensitive() {
        assert_eq!(parse_time("250MS").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_time("2S").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn unknown_units_are_rejected() {
        for value in ["300x", "300", "", "   ", "3min", "300px"] {
            let err = parse_time(value).unwrap_err();
            assert!(matches!(err, Error::InvalidTime { .. }), "{value:?} -> {err}");
        }
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for value in ["ms", "abcms", "-5ms", "NaNs", "infs"] {
            assert!(parse_time(value).is_err(), "{value:?} should not parse");
        }
    }
}
