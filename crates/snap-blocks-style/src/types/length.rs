//! Pixel lengths.

/// Parse a pixel length such as `120px` or a bare number such as `120`.
///
/// Returns `None` for keywords (`auto`), other units, and malformed input.
pub fn parse_px(value: &str) -> Option<f32> {
    let trimmed = value.trim();
    let number = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("PX"))
        .unwrap_or(trimmed)
        .trim();
    number.parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Format a pixel length the way computed styles report it.
pub fn format_px(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixels_and_bare_numbers() {
        assert_eq!(parse_px("120px"), Some(120.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("48"), Some(48.0));
    }

    #[test]
    fn rejects_keywords_and_other_units() {
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("2em"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn formats_whole_and_fractional_pixels() {
        assert_eq!(format_px(120.0), "120px");
        assert_eq!(format_px(12.5), "12.5px");
    }
}
