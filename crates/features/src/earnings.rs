//! Earnings / estimates statement parsing.
//!
//! Quarterly rows ("EPS Estimate", "EPS Actual", "Revenue Estimate",
//! "Revenue Actual") run oldest to newest; revision rows hold a single count
//! (`["EPS Up", "12"]`).

use crate::growth::growth;
use tracker_core::{Config, EarningsEstimateMetrics, RawStatementTable, RowLabelConfig};
use tracker_ingestion::{first_numeric, is_placeholder, last_numeric, to_number, RowMap};
use tracing::debug;

/// Derives quarterly growth and revision counts.
#[derive(Debug, Clone)]
pub struct EarningsEstimatesParser {
    labels: RowLabelConfig,
}

impl EarningsEstimatesParser {
    /// Create a parser using the configured row label candidates.
    pub fn new(config: &Config) -> Self {
        Self {
            labels: config.row_labels.clone(),
        }
    }

    /// Derive quarterly metrics. Each metric is independent of the others.
    pub fn parse(&self, table: &RawStatementTable) -> EarningsEstimateMetrics {
        let rows = RowMap::from_table(table);
        if rows.is_empty() {
            debug!("earnings estimates: table has no rows");
            return EarningsEstimateMetrics::default();
        }
        let labels = &self.labels;

        let eps_est = lookup(&rows, "EPS estimate", &labels.eps_estimate);
        let eps_act = lookup(&rows, "EPS actual", &labels.eps_actual);
        let rev_est = lookup(&rows, "revenue estimate", &labels.revenue_estimate);
        let rev_act = lookup(&rows, "revenue actual", &labels.revenue_actual);

        EarningsEstimateMetrics {
            eps_q_est: estimate_yoy(eps_est, eps_act),
            eps_q_rep: eps_act.and_then(reported_yoy),
            rev_q_est: estimate_yoy(rev_est, rev_act),
            rev_q_rep: rev_act.and_then(reported_yoy),
            eps_revisions_up: revision_count(lookup(&rows, "EPS up", &labels.eps_revisions_up)),
            eps_revisions_down: revision_count(lookup(
                &rows,
                "EPS down",
                &labels.eps_revisions_down,
            )),
            sales_revisions_up: revision_count(lookup(
                &rows,
                "sales up",
                &labels.sales_revisions_up,
            )),
            sales_revisions_down: revision_count(lookup(
                &rows,
                "sales down",
                &labels.sales_revisions_down,
            )),
        }
    }
}

fn lookup<'a>(rows: &'a RowMap, what: &str, candidates: &[String]) -> Option<&'a [String]> {
    let row = rows.find_row(candidates);
    if row.is_none() {
        debug!(row = what, ?candidates, "earnings estimates: row not found");
    }
    row
}

/// Next quarter's estimate vs the same quarter a year ago.
///
/// The estimate is the first numeric value scanning forward, the year-ago
/// actual is the last numeric value scanning backward.
fn estimate_yoy(estimate: Option<&[String]>, actual: Option<&[String]>) -> Option<f64> {
    let (estimate, actual) = (estimate?, actual?);
    growth(first_numeric(estimate), last_numeric(actual))
}

/// Growth between the two most recent non-placeholder actuals.
fn reported_yoy(actual: &[String]) -> Option<f64> {
    let present: Vec<&str> = actual
        .iter()
        .map(String::as_str)
        .filter(|v| !is_placeholder(v))
        .collect();
    match present.as_slice() {
        [.., prior, current] => growth(to_number(current), to_number(prior)),
        _ => None,
    }
}

/// First numeric value truncated toward zero.
fn revision_count(row: Option<&[String]>) -> Option<i64> {
    first_numeric(row?).map(|v| v.trunc() as i64)
}
