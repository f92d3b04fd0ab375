//! Annual income statement parsing.
//!
//! Headers are year labels, estimate years suffixed "E":
//! `["", "2021", "2022", "2023", "2024", "2025E", "2026E"]`.

use crate::growth::growth;
use tracker_core::{AnnualIncomeMetrics, Config, RawStatementTable};
use tracker_ingestion::{ColumnClassification, RowMap};
use tracing::debug;

/// Derives revenue and EPS growth from an annual income statement.
#[derive(Debug, Clone)]
pub struct AnnualIncomeParser {
    revenue_labels: Vec<String>,
    eps_labels: Vec<String>,
}

impl AnnualIncomeParser {
    /// Create a parser using the configured row label candidates.
    pub fn new(config: &Config) -> Self {
        Self {
            revenue_labels: config.row_labels.revenue.clone(),
            eps_labels: config.row_labels.eps.clone(),
        }
    }

    /// Derive annual growth metrics. Each metric is independent of the others.
    pub fn parse(&self, table: &RawStatementTable) -> AnnualIncomeMetrics {
        let columns = ColumnClassification::from_headers(table.value_headers());
        let rows = RowMap::from_table(table);
        let mut out = AnnualIncomeMetrics::default();
        if columns.is_empty() || rows.is_empty() {
            debug!(
                columns = columns.len(),
                rows = rows.len(),
                "annual income: nothing to parse"
            );
            return out;
        }

        match rows.find_row(&self.revenue_labels) {
            Some(row) => {
                let parts = columns.partition(row);
                let (rep, est) = (&parts.reported, &parts.estimates);
                if rep.len() >= 2 {
                    out.rev_ann_rep = growth(rep[rep.len() - 1], rep[rep.len() - 2]);
                }
                if let (Some(&last_rep), Some(&first_est)) = (rep.last(), est.first()) {
                    out.rev_ann_est_cur = growth(first_est, last_rep);
                }
                if est.len() >= 2 {
                    out.rev_ann_est_fut = growth(est[1], est[0]);
                }
            }
            None => debug!(candidates = ?self.revenue_labels, "annual income: no revenue row"),
        }

        match rows.find_row(&self.eps_labels) {
            Some(row) => {
                let rep = columns.partition(row).reported;
                if rep.len() >= 2 {
                    out.eps_yy_ttm = growth(rep[rep.len() - 1], rep[rep.len() - 2]);
                }
            }
            None => debug!(candidates = ?self.eps_labels, "annual income: no EPS row"),
        }

        out
    }
}
