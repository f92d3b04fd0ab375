//! Splitting of compound percentage fields.
//!
//! The snapshot's surprise field carries two percentages with no separator,
//! e.g. `"6.24%3.88%"` for EPS and sales surprise. Extraction assumes exactly
//! that shape: the first token is EPS, the second is sales, anything after is
//! ignored.

use once_cell::sync::Lazy;
use regex::Regex;

static PERCENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+\.?\d*%").expect("percent token pattern is valid"));

/// All percentage tokens in `raw`, left to right, non-overlapping.
pub fn split_percent_tokens(raw: &str) -> Vec<&str> {
    PERCENT_TOKEN.find_iter(raw).map(|m| m.as_str()).collect()
}

/// First and second percentage tokens of a two-value compound field.
pub fn split_pair(raw: &str) -> (Option<&str>, Option<&str>) {
    let mut tokens = PERCENT_TOKEN.find_iter(raw).map(|m| m.as_str());
    let first = tokens.next();
    let second = tokens.next();
    (first, second)
}
