//! Row label resolution for statement tables.
//!
//! Row labels drift between data vintages ("Revenue", "Total Revenue",
//! "Sales"), so rows are looked up by case-insensitive substring match over a
//! prioritized candidate list rather than by exact key.

use crate::coerce::clean_token;
use tracker_core::RawStatementTable;
use tracing::{debug, trace};

/// Insertion-ordered mapping from row label to cleaned values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMap {
    entries: Vec<(String, Vec<String>)>,
}

impl RowMap {
    /// Build a row map from a raw table.
    ///
    /// Rows with fewer than two cells are skipped. A repeated label replaces
    /// the earlier values but keeps the earlier position.
    pub fn from_table(table: &RawStatementTable) -> Self {
        let mut map = Self::default();
        for row in &table.rows {
            if row.len() < 2 {
                continue;
            }
            let label = row[0].trim().to_string();
            let values = row[1..].iter().map(|v| clean_token(v)).collect();
            map.insert(label, values);
        }
        trace!(rows = map.len(), "built row map");
        map
    }

    fn insert(&mut self, label: String, values: Vec<String>) {
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some(entry) => {
                debug!(label = %label, "duplicate row label, keeping last values");
                entry.1 = values;
            }
            None => self.entries.push((label, values)),
        }
    }

    /// Resolve the first row matching any candidate, in candidate order.
    ///
    /// For each candidate, keys are scanned in insertion order and the first
    /// key containing the candidate (case-insensitive) wins. When several
    /// rows contain the same candidate the earliest row is returned.
    pub fn find_row<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&[String]> {
        candidates.iter().find_map(|candidate| {
            let needle = candidate.as_ref().to_lowercase();
            self.entries
                .iter()
                .find(|(key, _)| key.to_lowercase().contains(&needle))
                .map(|(_, values)| values.as_slice())
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
