//! Numeral recognition
//!
//! A numeral is an optional sign, digits with at most one radix point (at
//! least one digit overall) and an optional exponent, optionally surrounded
//! by whitespace. Words such as `inf` or `NaN` are not numerals.

/// Check whether `s` is a numeral
pub fn is_numeral(s: &str) -> bool {
    let bytes = s.trim().as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut digits = 0;
    let mut radix = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !radix => radix = true,
            _ => break,
        }
        i += 1;
    }
    if digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }

    i == bytes.len()
}

/// Parse a numeral, or `None` when `s` is not one
pub fn parse_numeral(s: &str) -> Option<f64> {
    if !is_numeral(s) {
        return None;
    }
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerals() {
        for s in ["1", "2.5", " 3 ", "-4", "+0.5", ".5", "5.", "1e3", "2.5E-2"] {
            assert!(is_numeral(s), "{s:?} should be a numeral");
        }
    }

    #[test]
    fn test_non_numerals() {
        for s in ["", " ", "x", "1.2.3", "1 2", "-", ".", "1e", "inf", "NaN", "0x10", "1,5"] {
            assert!(!is_numeral(s), "{s:?} should not be a numeral");
        }
    }

    #[test]
    fn test_parse_numeral() {
        assert_eq!(parse_numeral(" 1.5 "), Some(1.5));
        assert_eq!(parse_numeral("-2e2"), Some(-200.0));
        assert_eq!(parse_numeral("abc"), None);
    }
}
