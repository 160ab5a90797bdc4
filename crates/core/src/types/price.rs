//! Price parsing for raw form input.
//!
//! Prices are typed as free text and only interpreted as a number when a
//! record is built. Parsing is lenient: the longest numeric prefix wins and
//! anything without one becomes `NaN`. `NaN` is passed through to the record
//! as-is; callers that want to reject it must do so themselves.

/// Parse the numeric prefix of a raw price string.
///
/// - Leading whitespace is skipped.
/// - An optional sign is followed by digits with an optional fraction and
///   exponent, or by `Infinity`.
/// - Characters after the numeric prefix are ignored (`"12abc"` is `12.0`).
/// - Input with no numeric prefix, including `""`, yields `f64::NAN`.
///
/// # Examples
///
/// ```
/// use listing_core::parse_price;
///
/// assert_eq!(parse_price("19.99"), 19.99);
/// assert_eq!(parse_price("  42 USD"), 42.0);
/// assert!(parse_price("").is_nan());
/// assert!(parse_price("free").is_nan());
/// ```
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s.get(..end)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .iter()
        .skip(from)
        .take_while(|b| b.is_ascii_digit())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert!((parse_price("10") - 10.0).abs() < f64::EPSILON);
        assert!((parse_price("19.99") - 19.99).abs() < f64::EPSILON);
        assert!((parse_price("-3.5") + 3.5).abs() < f64::EPSILON);
        assert!((parse_price("+7") - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_partial_forms() {
        assert!((parse_price(".5") - 0.5).abs() < f64::EPSILON);
        assert!((parse_price("5.") - 5.0).abs() < f64::EPSILON);
        assert!((parse_price("1e3") - 1000.0).abs() < f64::EPSILON);
        // Dangling exponent marker is not part of the number
        assert!((parse_price("2e") - 2.0).abs() < f64::EPSILON);
        assert!((parse_price("2e+") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_ignores_leading_whitespace_and_trailing_text() {
        assert!((parse_price("  12abc") - 12.0).abs() < f64::EPSILON);
        assert!((parse_price("\t8.25 dollars") - 8.25).abs() < f64::EPSILON);
        assert!((parse_price("3.1.4") - 3.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_without_numeric_prefix_is_nan() {
        assert!(parse_price("").is_nan());
        assert!(parse_price("   ").is_nan());
        assert!(parse_price("abc").is_nan());
        assert!(parse_price(".").is_nan());
        assert!(parse_price("-").is_nan());
        assert!(parse_price("$5").is_nan());
    }

    #[test]
    fn test_parse_infinity() {
        assert!(parse_price("Infinity").is_infinite());
        assert!(parse_price("-Infinity").is_sign_negative());
        // Lowercase is not recognised
        assert!(parse_price("infinity").is_nan());
    }
}
