//! Numeric coercion of dirty upstream tokens.
//!
//! Upstream cells mix numbers with thousands separators and placeholders
//! ("-", "N/A", "None"). Coercion never fails: anything that is not a finite
//! number is `None`.

/// Tokens that mean "no value", compared case-insensitively after trimming.
const PLACEHOLDERS: [&str; 5] = ["", "-", "n/a", "none", "nan"];

/// Whether a token is a placeholder for an absent value.
pub fn is_placeholder(token: &str) -> bool {
    let token = token.trim();
    PLACEHOLDERS.iter().any(|p| token.eq_ignore_ascii_case(p))
}

/// Strip thousands separators and surrounding whitespace.
pub fn clean_token(token: &str) -> String {
    token.replace(',', "").trim().to_string()
}

/// Parse a token as a float, returning `None` for placeholders and junk.
pub fn to_number(token: &str) -> Option<f64> {
    if is_placeholder(token) {
        return None;
    }
    clean_token(token)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// First value (left to right) that parses as a number.
pub fn first_numeric<S: AsRef<str>>(values: &[S]) -> Option<f64> {
    values.iter().find_map(|v| to_number(v.as_ref()))
}

/// Last value (right to left) that parses as a number.
pub fn last_numeric<S: AsRef<str>>(values: &[S]) -> Option<f64> {
    values.iter().rev().find_map(|v| to_number(v.as_ref()))
}
