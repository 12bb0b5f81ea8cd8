//! Small formatting helpers shared by the converters.

/// Formats `value` with at most `places` decimals, dropping trailing zeros.
///
/// ```text
/// format_decimal(0.5, 4)    -> "0.5"
/// format_decimal(1.0, 4)    -> "1"
/// format_decimal(0.33333, 4) -> "0.3333"
/// ```
pub fn format_decimal(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    // "-0" is not a useful rendering of a value that rounded to zero
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts a `[0, 1]` channel to an 8-bit value, clamping out-of-range input.
pub fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_strips_zeros() {
        assert_eq!(format_decimal(0.5, 4), "0.5");
        assert_eq!(format_decimal(1.0, 4), "1");
        assert_eq!(format_decimal(0.125, 4), "0.125");
    }

    #[test]
    fn test_format_decimal_rounds() {
        assert_eq!(format_decimal(1.0 / 3.0, 4), "0.3333");
        assert_eq!(format_decimal(2.0 / 3.0, 2), "0.67");
    }

    #[test]
    fn test_format_decimal_zero_places() {
        assert_eq!(format_decimal(12.0, 0), "12");
    }

    #[test]
    fn test_format_decimal_negative_zero() {
        assert_eq!(format_decimal(-0.00001, 2), "0");
    }

    #[test]
    fn test_to_byte_clamps() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(1.5), 255);
        assert_eq!(to_byte(-0.2), 0);
        assert_eq!(to_byte(0.5), 128);
    }
}
