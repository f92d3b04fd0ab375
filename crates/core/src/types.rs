//! Core data types for the stock-tracker engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Display placeholder for an absent value.
pub const PLACEHOLDER: &str = "-";

/// Flat field-name → value snapshot for one entity.
pub type SnapshotRecord = HashMap<String, String>;

/// A raw label/values statement table as delivered by the upstream source.
///
/// `headers[0]` is conventionally blank. Each row holds the label in cell 0
/// and values in cells 1.., aligned by position to `headers[1..]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct RawStatementTable {
    /// Column headers, including the leading label column.
    pub headers: Vec<String>,
    /// Raw rows: label followed by values.
    #[serde(rename = "data")]
    pub rows: Vec<Vec<String>>,
}

impl RawStatementTable {
    /// Create a table from already-stringified headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse a statement payload (`{"headers": [...], "data": [[...]]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Value column headers (everything after the label column).
    pub fn value_headers(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }
}

impl TryFrom<Value> for RawStatementTable {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(mut payload) = value else {
            return Err(Error::data("statement payload must be a JSON object"));
        };

        // Missing headers only degrade the derived fields; missing data means
        // this is not a statement payload at all.
        let headers = match payload.remove("headers") {
            Some(Value::Array(cells)) => cells.iter().map(cell_to_string).collect(),
            _ => Vec::new(),
        };
        let rows = match payload.remove("data") {
            Some(Value::Array(rows)) => rows
                .iter()
                .map(|row| match row {
                    Value::Array(cells) => cells.iter().map(cell_to_string).collect(),
                    _ => Vec::new(),
                })
                .collect(),
            Some(_) => return Err(Error::data("statement payload `data` must be an array")),
            None => return Err(Error::data("statement payload has no `data` array")),
        };

        Ok(Self { headers, rows })
    }
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One entity's inputs, as handed over by the collector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockInput {
    /// Ticker symbol.
    pub ticker: String,
    /// Snapshot fundamentals (empty when the upstream fetch failed).
    #[serde(default)]
    pub fundament: SnapshotRecord,
    /// Annual income statement.
    #[serde(default)]
    pub annual_income: Option<RawStatementTable>,
    /// Earnings / estimates statement.
    #[serde(default)]
    pub earnings_estimates: Option<RawStatementTable>,
}

impl StockInput {
    /// Create an input with a snapshot and no statement tables.
    pub fn from_snapshot(ticker: impl Into<String>, fundament: SnapshotRecord) -> Self {
        Self {
            ticker: ticker.into(),
            fundament,
            annual_income: None,
            earnings_estimates: None,
        }
    }
}

/// Market capitalization bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapCategory {
    /// At least $200B.
    #[serde(rename = "Mega Cap")]
    MegaCap,
    /// At least $20B.
    #[serde(rename = "Large Cap")]
    LargeCap,
    /// At least $2B.
    #[serde(rename = "Mid Cap")]
    MidCap,
    /// Below $2B.
    #[serde(rename = "Under $2B")]
    Under2B,
    /// Market cap unavailable.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl CapCategory {
    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            CapCategory::MegaCap => "Mega Cap",
            CapCategory::LargeCap => "Large Cap",
            CapCategory::MidCap => "Mid Cap",
            CapCategory::Under2B => "Under $2B",
            CapCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growth metrics derived from an annual income statement.
///
/// Values are percentages; `None` means the operands were unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualIncomeMetrics {
    /// EPS growth between the two most recent reported years.
    pub eps_yy_ttm: Option<f64>,
    /// Revenue growth between the two most recent reported years.
    pub rev_ann_rep: Option<f64>,
    /// First estimate year vs last reported year.
    pub rev_ann_est_cur: Option<f64>,
    /// Second estimate year vs first estimate year.
    pub rev_ann_est_fut: Option<f64>,
}

/// Quarterly growth and revision counts from an earnings/estimates statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsEstimateMetrics {
    /// Next quarter EPS estimate vs the same quarter a year ago.
    pub eps_q_est: Option<f64>,
    /// EPS growth between the two most recent actual quarters.
    pub eps_q_rep: Option<f64>,
    /// Next quarter revenue estimate vs the same quarter a year ago.
    pub rev_q_est: Option<f64>,
    /// Revenue growth between the two most recent actual quarters.
    pub rev_q_rep: Option<f64>,
    pub eps_revisions_up: Option<i64>,
    pub eps_revisions_down: Option<i64>,
    pub sales_revisions_up: Option<i64>,
    pub sales_revisions_down: Option<i64>,
}

/// Fixed-shape display record for one entity.
///
/// Every field is always populated; absence is [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStockRecord {
    pub ticker: String,
    /// Market cap as shown upstream (e.g. "3907.83B").
    pub market_cap: String,
    pub cap_category: CapCategory,
    /// Next earnings event label (e.g. "Jan 29 AMC").
    pub next_earnings: String,
    pub eps_yy_ttm: String,
    pub sales_yy_ttm: String,
    pub eps_q_rep: String,
    pub sales_q_rep: String,
    pub eps_surpr: String,
    pub sales_surpr: String,
    pub avg_target_price: String,
    pub rev_ann_rep: String,
    pub rev_ann_est_cur: String,
    pub rev_ann_est_fut: String,
    pub eps_q_est: String,
    pub rev_q_est: String,
    pub rev_q_rep: String,
    pub eps_revisions_up: String,
    pub eps_revisions_down: String,
    pub sales_revisions_up: String,
    pub sales_revisions_down: String,
}

impl NormalizedStockRecord {
    /// Output keys, in display order.
    pub const FIELD_NAMES: [&'static str; 21] = [
        "ticker",
        "market_cap",
        "cap_category",
        "next_earnings",
        "eps_yy_ttm",
        "sales_yy_ttm",
        "eps_q_rep",
        "sales_q_rep",
        "eps_surpr",
        "sales_surpr",
        "avg_target_price",
        "rev_ann_rep",
        "rev_ann_est_cur",
        "rev_ann_est_fut",
        "eps_q_est",
        "rev_q_est",
        "rev_q_rep",
        "eps_revisions_up",
        "eps_revisions_down",
        "sales_revisions_up",
        "sales_revisions_down",
    ];

    /// The record as an ordered list of `(key, display value)` pairs.
    pub fn fields(&self) -> [(&'static str, &str); 21] {
        let values = [
            self.ticker.as_str(),
            self.market_cap.as_str(),
            self.cap_category.as_str(),
            self.next_earnings.as_str(),
            self.eps_yy_ttm.as_str(),
            self.sales_yy_ttm.as_str(),
            self.eps_q_rep.as_str(),
            self.sales_q_rep.as_str(),
            self.eps_surpr.as_str(),
            self.sales_surpr.as_str(),
            self.avg_target_price.as_str(),
            self.rev_ann_rep.as_str(),
            self.rev_ann_est_cur.as_str(),
            self.rev_ann_est_fut.as_str(),
            self.eps_q_est.as_str(),
            self.rev_q_est.as_str(),
            self.rev_q_rep.as_str(),
            self.eps_revisions_up.as_str(),
            self.eps_revisions_down.as_str(),
            self.sales_revisions_up.as_str(),
            self.sales_revisions_down.as_str(),
        ];
        let mut out = [("", ""); 21];
        for (slot, (name, value)) in out.iter_mut().zip(Self::FIELD_NAMES.iter().zip(values)) {
            *slot = (*name, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_record() -> NormalizedStockRecord {
        let dash = || PLACEHOLDER.to_string();
        NormalizedStockRecord {
            ticker: "AAPL".to_string(),
            market_cap: dash(),
            cap_category: CapCategory::Unknown,
            next_earnings: dash(),
            eps_yy_ttm: dash(),
            sales_yy_ttm: dash(),
            eps_q_rep: dash(),
            sales_q_rep: dash(),
            eps_surpr: dash(),
            sales_surpr: dash(),
            avg_target_price: dash(),
            rev_ann_rep: dash(),
            rev_ann_est_cur: dash(),
            rev_ann_est_fut: dash(),
            eps_q_est: dash(),
            rev_q_est: dash(),
            rev_q_rep: dash(),
            eps_revisions_up: dash(),
            eps_revisions_down: dash(),
            sales_revisions_up: dash(),
            sales_revisions_down: dash(),
        }
    }

    #[test]
    fn test_table_from_json() {
        let table = RawStatementTable::from_json(
            r#"{"headers": ["", "2023", "2024E"], "data": [["Revenue", "1,000", 1100.5], ["EPS", null]]}"#,
        )
        .unwrap();
        assert_eq!(table.headers, vec!["", "2023", "2024E"]);
        assert_eq!(table.value_headers(), &["2023".to_string(), "2024E".to_string()]);
        assert_eq!(table.rows[0], vec!["Revenue", "1,000", "1100.5"]);
        assert_eq!(table.rows[1], vec!["EPS", ""]);
    }

    #[test]
    fn test_table_missing_headers_is_empty() {
        let table = RawStatementTable::from_json(r#"{"data": [["EPS Up", 12]]}"#).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.value_headers().is_empty());
        assert_eq!(table.rows[0], vec!["EPS Up", "12"]);
    }

    #[test]
    fn test_table_non_array_row_is_empty() {
        let table = RawStatementTable::from_json(r#"{"headers": [], "data": ["oops"]}"#).unwrap();
        assert_eq!(table.rows, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_table_contract_violations() {
        assert!(matches!(
            RawStatementTable::from_json(r#"{"headers": []}"#),
            Err(Error::Data(_))
        ));
        assert!(matches!(
            RawStatementTable::from_json(r#"{"data": {}}"#),
            Err(Error::Data(_))
        ));
        assert!(matches!(
            RawStatementTable::from_json("[1, 2]"),
            Err(Error::Data(_))
        ));
        assert!(matches!(
            RawStatementTable::from_json("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_stock_input_deserialize() {
        let input: StockInput = serde_json::from_str(
            r#"{
                "ticker": "MSFT",
                "fundament": {"Market Cap": "3100.00B"},
                "annual_income": {"headers": ["", "2024"], "data": [["Revenue", "245,122"]]}
            }"#,
        )
        .unwrap();
        assert_eq!(input.ticker, "MSFT");
        assert_eq!(input.fundament["Market Cap"], "3100.00B");
        assert_eq!(input.annual_income.unwrap().rows[0][1], "245,122");
        assert!(input.earnings_estimates.is_none());
    }

    #[test]
    fn test_stock_input_rejects_bad_table() {
        let result: std::result::Result<StockInput, _> =
            serde_json::from_str(r#"{"ticker": "X", "annual_income": {"headers": []}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cap_category_labels() {
        assert_eq!(CapCategory::MegaCap.to_string(), "Mega Cap");
        assert_eq!(CapCategory::Under2B.as_str(), "Under $2B");
        assert_eq!(
            serde_json::to_string(&CapCategory::LargeCap).unwrap(),
            "\"Large Cap\""
        );
    }

    #[test]
    fn test_record_fields_cover_every_key() {
        let record = placeholder_record();
        let fields = record.fields();
        assert_eq!(fields.len(), NormalizedStockRecord::FIELD_NAMES.len());
        assert_eq!(fields[0], ("ticker", "AAPL"));
        assert_eq!(fields[2], ("cap_category", "Unknown"));
        assert!(fields[3..].iter().all(|(_, v)| *v == PLACEHOLDER));
    }

    #[test]
    fn test_record_serializes_with_fixed_keys() {
        let value = serde_json::to_value(placeholder_record()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), NormalizedStockRecord::FIELD_NAMES.len());
        for name in NormalizedStockRecord::FIELD_NAMES {
            assert!(obj.contains_key(name), "missing key {}", name);
        }
        assert_eq!(obj["cap_category"], "Unknown");
    }
}
