//! Period-over-period growth calculation.
//!
//! Growth is `(current - prior) / |prior| * 100`. Dividing by the absolute
//! prior keeps the sign of the change meaningful when the prior period was
//! negative (a loss shrinking from -2.0 to -1.0 is +50%).

use tracker_core::{Config, PLACEHOLDER};

/// Percentage change from `prior` to `current`.
///
/// `None` when either operand is absent or `prior` is exactly zero.
pub fn growth(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    let (current, prior) = (current?, prior?);
    if prior == 0.0 {
        return None;
    }
    Some((current - prior) / prior.abs() * 100.0)
}

/// Render a percentage with explicit sign, e.g. `+12.3%`, or `-` if absent.
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:+.*}%", decimals, v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Render an integer count, or `-` if absent.
pub fn format_count(value: Option<i64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// Growth calculator bound to an output precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthCalculator {
    decimals: usize,
}

impl Default for GrowthCalculator {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

impl GrowthCalculator {
    /// Create a calculator with a fixed number of decimal places.
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }

    /// Create a calculator from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.format.decimals)
    }

    /// Decimal places used for output.
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Numeric growth; see [`growth`].
    pub fn growth(&self, current: Option<f64>, prior: Option<f64>) -> Option<f64> {
        growth(current, prior)
    }

    /// Formatted growth, `-` when not computable.
    pub fn growth_percent(&self, current: Option<f64>, prior: Option<f64>) -> String {
        self.format(growth(current, prior))
    }

    /// Format an already-computed percentage.
    pub fn format(&self, value: Option<f64>) -> String {
        format_percent(value, self.decimals)
    }
}
