//! Configuration structures for the stock-tracker engine.
//!
//! Everything here is a formatting or spelling choice. Retrieval tunables
//! (retries, request pacing) belong to the collector and are not modelled.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest supported fixed precision for percentage output.
pub const MAX_DECIMALS: usize = 10;

/// Main configuration for the normalization engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output formatting.
    pub format: FormatConfig,
    /// Snapshot key spellings per output field.
    pub snapshot_keys: SnapshotKeyConfig,
    /// Statement row label candidates.
    pub row_labels: RowLabelConfig,
}

impl Config {
    /// Parse a (possibly partial) configuration from JSON.
    ///
    /// Missing sections and fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file in JSON format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check that every lookup list is usable.
    pub fn validate(&self) -> Result<()> {
        if self.format.decimals > MAX_DECIMALS {
            return Err(Error::config(format!(
                "format.decimals must be at most {}, got {}",
                MAX_DECIMALS, self.format.decimals
            )));
        }
        for (name, list) in self
            .snapshot_keys
            .named_lists()
            .into_iter()
            .chain(self.row_labels.named_lists())
        {
            if list.is_empty() {
                return Err(Error::config(format!("{} must not be empty", name)));
            }
            if list.iter().any(|s| s.trim().is_empty()) {
                return Err(Error::config(format!("{} contains a blank entry", name)));
            }
        }
        Ok(())
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Fixed decimal places for derived growth percentages.
    pub decimals: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

/// Acceptable snapshot key spellings, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotKeyConfig {
    pub market_cap: Vec<String>,
    pub next_earnings: Vec<String>,
    pub eps_yy_ttm: Vec<String>,
    pub sales_yy_ttm: Vec<String>,
    pub eps_q_q: Vec<String>,
    pub sales_q_q: Vec<String>,
    /// Combined EPS/Sales surprise field (two percentages, no separator).
    pub surprise: Vec<String>,
    pub target_price: Vec<String>,
}

impl SnapshotKeyConfig {
    fn named_lists(&self) -> Vec<(&'static str, &[String])> {
        vec![
            ("snapshot_keys.market_cap", self.market_cap.as_slice()),
            ("snapshot_keys.next_earnings", self.next_earnings.as_slice()),
            ("snapshot_keys.eps_yy_ttm", self.eps_yy_ttm.as_slice()),
            ("snapshot_keys.sales_yy_ttm", self.sales_yy_ttm.as_slice()),
            ("snapshot_keys.eps_q_q", self.eps_q_q.as_slice()),
            ("snapshot_keys.sales_q_q", self.sales_q_q.as_slice()),
            ("snapshot_keys.surprise", self.surprise.as_slice()),
            ("snapshot_keys.target_price", self.target_price.as_slice()),
        ]
    }
}

impl Default for SnapshotKeyConfig {
    fn default() -> Self {
        Self {
            market_cap: strings(&["Market Cap", "Market Cap."]),
            next_earnings: strings(&["Earnings", "Earnings Date"]),
            eps_yy_ttm: strings(&["EPS Y/Y TTM"]),
            sales_yy_ttm: strings(&["Sales Y/Y TTM"]),
            eps_q_q: strings(&["EPS Q/Q"]),
            sales_q_q: strings(&["Sales Q/Q"]),
            surprise: strings(&["EPS/Sales Surpr.", "EPS/Sales Surprise"]),
            target_price: strings(&["Target Price", "Target"]),
        }
    }
}

/// Row label candidates for statement tables, in priority order.
///
/// Matching is case-insensitive substring containment, so a candidate also
/// matches longer labels ("Revenue" matches "Total Revenue").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLabelConfig {
    /// Annual income: revenue row.
    pub revenue: Vec<String>,
    /// Annual income: EPS row.
    pub eps: Vec<String>,
    pub eps_estimate: Vec<String>,
    pub eps_actual: Vec<String>,
    pub revenue_estimate: Vec<String>,
    pub revenue_actual: Vec<String>,
    pub eps_revisions_up: Vec<String>,
    pub eps_revisions_down: Vec<String>,
    pub sales_revisions_up: Vec<String>,
    pub sales_revisions_down: Vec<String>,
}

impl RowLabelConfig {
    fn named_lists(&self) -> Vec<(&'static str, &[String])> {
        vec![
            ("row_labels.revenue", self.revenue.as_slice()),
            ("row_labels.eps", self.eps.as_slice()),
            ("row_labels.eps_estimate", self.eps_estimate.as_slice()),
            ("row_labels.eps_actual", self.eps_actual.as_slice()),
            ("row_labels.revenue_estimate", self.revenue_estimate.as_slice()),
            ("row_labels.revenue_actual", self.revenue_actual.as_slice()),
            ("row_labels.eps_revisions_up", self.eps_revisions_up.as_slice()),
            ("row_labels.eps_revisions_down", self.eps_revisions_down.as_slice()),
            ("row_labels.sales_revisions_up", self.sales_revisions_up.as_slice()),
            ("row_labels.sales_revisions_down", self.sales_revisions_down.as_slice()),
        ]
    }
}

impl Default for RowLabelConfig {
    fn default() -> Self {
        Self {
            revenue: strings(&["Revenue", "Total Revenue", "Sales"]),
            eps: strings(&["EPS", "Earnings Per Share"]),
            eps_estimate: strings(&["EPS Estimate", "EPS Est."]),
            eps_actual: strings(&["EPS Actual", "EPS Act."]),
            revenue_estimate: strings(&["Revenue Estimate", "Sales Estimate", "Rev. Estimate"]),
            revenue_actual: strings(&["Revenue Actual", "Sales Actual", "Rev. Actual"]),
            eps_revisions_up: strings(&["EPS Up"]),
            eps_revisions_down: strings(&["EPS Down", "EPS Dn"]),
            sales_revisions_up: strings(&["Revenue Up", "Rev Up", "Sales Up"]),
            sales_revisions_down: strings(&["Revenue Down", "Rev Down", "Sales Down"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
