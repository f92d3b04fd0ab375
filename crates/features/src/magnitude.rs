//! Market capitalization scale parsing and bucketing.

use tracker_core::CapCategory;
use tracker_ingestion::{is_placeholder, to_number};

/// Parse a scaled money string ("1.23T", "5.2B", "850M") into billions.
///
/// Unsuffixed numbers are absolute units. Placeholders and unparseable
/// prefixes give `None`.
pub fn parse_magnitude(token: &str) -> Option<f64> {
    if is_placeholder(token) {
        return None;
    }
    let s = token.trim().to_uppercase();
    if let Some(prefix) = s.strip_suffix('T') {
        to_number(prefix).map(|v| v * 1000.0)
    } else if let Some(prefix) = s.strip_suffix('B') {
        to_number(prefix)
    } else if let Some(prefix) = s.strip_suffix('M') {
        to_number(prefix).map(|v| v / 1000.0)
    } else {
        to_number(&s).map(|v| v / 1e9)
    }
}

/// Bucket a market cap in billions. Lower bounds are inclusive.
pub fn classify(billions: Option<f64>) -> CapCategory {
    match billions {
        None => CapCategory::Unknown,
        Some(b) if b >= 200.0 => CapCategory::MegaCap,
        Some(b) if b >= 20.0 => CapCategory::LargeCap,
        Some(b) if b >= 2.0 => CapCategory::MidCap,
        Some(_) => CapCategory::Under2B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_suffixes() {
        assert_relative_eq!(parse_magnitude("1.23T").unwrap(), 1230.0, epsilon = 1e-9);
        assert_relative_eq!(parse_magnitude("850M").unwrap(), 0.85, epsilon = 1e-12);
        assert_relative_eq!(parse_magnitude("5.2B").unwrap(), 5.2);
        assert_relative_eq!(parse_magnitude("3907.83B").unwrap(), 3907.83);
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        assert_relative_eq!(parse_magnitude(" 12.5b ").unwrap(), 12.5);
        assert_relative_eq!(parse_magnitude("2t").unwrap(), 2000.0);
    }

    #[test]
    fn test_parse_absolute_units() {
        assert_relative_eq!(parse_magnitude("2500000000").unwrap(), 2.5);
        assert_relative_eq!(parse_magnitude("1,000,000,000").unwrap(), 1.0);
    }

    #[test]
    fn test_parse_placeholders_and_junk() {
        for token in ["-", "", "  ", "nan", "None", "N/A", "B", "abcM", "1.2X"] {
            assert_eq!(parse_magnitude(token), None, "token {:?}", token);
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(Some(200.0)), CapCategory::MegaCap);
        assert_eq!(classify(Some(199.99)), CapCategory::LargeCap);
        assert_eq!(classify(Some(20.0)), CapCategory::LargeCap);
        assert_eq!(classify(Some(19.99)), CapCategory::MidCap);
        assert_eq!(classify(Some(2.0)), CapCategory::MidCap);
        assert_eq!(classify(Some(1.99)), CapCategory::Under2B);
        assert_eq!(classify(None), CapCategory::Unknown);
    }

    #[test]
    fn test_classify_parsed() {
        assert_eq!(classify(parse_magnitude("3907.83B")), CapCategory::MegaCap);
        assert_eq!(classify(parse_magnitude("850M")), CapCategory::Under2B);
        assert_eq!(classify(parse_magnitude("-")), CapCategory::Unknown);
    }
}
