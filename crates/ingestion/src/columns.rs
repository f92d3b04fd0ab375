//! Reported vs estimate column classification.
//!
//! Annual statement headers are year labels; estimate years carry an "E"
//! suffix ("2025E"). Values are aligned to headers by position.

use crate::coerce::to_number;

/// Per-column estimate flags, aligned to row value positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    is_estimate: Vec<bool>,
}

/// A row's values split by column kind, input order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedValues {
    pub reported: Vec<Option<f64>>,
    pub estimates: Vec<Option<f64>>,
}

impl ColumnClassification {
    /// Classify value column headers (the label column already removed).
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let is_estimate = headers
            .iter()
            .map(|h| {
                h.as_ref()
                    .trim()
                    .chars()
                    .last()
                    .is_some_and(|c| c.eq_ignore_ascii_case(&'e'))
            })
            .collect();
        Self { is_estimate }
    }

    /// Number of classified columns.
    pub fn len(&self) -> usize {
        self.is_estimate.len()
    }

    /// Whether no columns were classified.
    pub fn is_empty(&self) -> bool {
        self.is_estimate.is_empty()
    }

    /// Split row values into reported and estimate subsequences.
    ///
    /// Each value is coerced individually, so junk cells stay in place as
    /// `None`. Values beyond the header count are ignored.
    pub fn partition<S: AsRef<str>>(&self, values: &[S]) -> PartitionedValues {
        let mut out = PartitionedValues::default();
        for (value, &is_est) in values.iter().zip(&self.is_estimate) {
            let parsed = to_number(value.as_ref());
            if is_est {
                out.estimates.push(parsed);
            } else {
                out.reported.push(parsed);
            }
        }
        out
    }
}
