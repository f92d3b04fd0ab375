//! PyO3 bindings for the stock-tracker normalization engine.
//!
//! Exposes the Rust engine to the Python collector:
//! - Record building from snapshot dicts and statement payloads
//! - Market cap parsing and bucketing
//! - Growth formatting
//! - Compound percentage splitting

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use tracker_core::{
    Config as RustConfig, Error as RustError, NormalizedStockRecord as RustRecord,
    RawStatementTable, StockInput,
};
use tracker_features::{magnitude, GrowthCalculator, RecordBuilder};
use tracker_ingestion::compound;

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_table(json: Option<&str>) -> PyResult<Option<RawStatementTable>> {
    json.map(RawStatementTable::from_json)
        .transpose()
        .map_err(to_py_err)
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// Normalized display record for one stock.
#[pyclass]
#[derive(Clone)]
pub struct StockRecord {
    #[pyo3(get)]
    pub ticker: String,
    #[pyo3(get)]
    pub market_cap: String,
    #[pyo3(get)]
    pub cap_category: String,
    #[pyo3(get)]
    pub next_earnings: String,
    #[pyo3(get)]
    pub eps_yy_ttm: String,
    #[pyo3(get)]
    pub sales_yy_ttm: String,
    #[pyo3(get)]
    pub eps_q_rep: String,
    #[pyo3(get)]
    pub sales_q_rep: String,
    #[pyo3(get)]
    pub eps_surpr: String,
    #[pyo3(get)]
    pub sales_surpr: String,
    #[pyo3(get)]
    pub avg_target_price: String,
    #[pyo3(get)]
    pub rev_ann_rep: String,
    #[pyo3(get)]
    pub rev_ann_est_cur: String,
    #[pyo3(get)]
    pub rev_ann_est_fut: String,
    #[pyo3(get)]
    pub eps_q_est: String,
    #[pyo3(get)]
    pub rev_q_est: String,
    #[pyo3(get)]
    pub rev_q_rep: String,
    #[pyo3(get)]
    pub eps_revisions_up: String,
    #[pyo3(get)]
    pub eps_revisions_down: String,
    #[pyo3(get)]
    pub sales_revisions_up: String,
    #[pyo3(get)]
    pub sales_revisions_down: String,
    /// Ordered key/value pairs for `to_dict`.
    pairs: Vec<(&'static str, String)>,
}

#[pymethods]
impl StockRecord {
    /// Record as a dict with the fixed key set, in display order.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for (key, value) in &self.pairs {
            dict.set_item(*key, value)?;
        }
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "StockRecord(ticker={}, market_cap={}, cap_category={})",
            self.ticker, self.market_cap, self.cap_category
        )
    }
}

impl From<RustRecord> for StockRecord {
    fn from(r: RustRecord) -> Self {
        let pairs = r
            .fields()
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        StockRecord {
            cap_category: r.cap_category.as_str().to_string(),
            ticker: r.ticker,
            market_cap: r.market_cap,
            next_earnings: r.next_earnings,
            eps_yy_ttm: r.eps_yy_ttm,
            sales_yy_ttm: r.sales_yy_ttm,
            eps_q_rep: r.eps_q_rep,
            sales_q_rep: r.sales_q_rep,
            eps_surpr: r.eps_surpr,
            sales_surpr: r.sales_surpr,
            avg_target_price: r.avg_target_price,
            rev_ann_rep: r.rev_ann_rep,
            rev_ann_est_cur: r.rev_ann_est_cur,
            rev_ann_est_fut: r.rev_ann_est_fut,
            eps_q_est: r.eps_q_est,
            rev_q_est: r.rev_q_est,
            rev_q_rep: r.rev_q_rep,
            eps_revisions_up: r.eps_revisions_up,
            eps_revisions_down: r.eps_revisions_down,
            sales_revisions_up: r.sales_revisions_up,
            sales_revisions_down: r.sales_revisions_down,
            pairs,
        }
    }
}

// ============================================================================
// Python-exposed Engine Classes
// ============================================================================

/// Record builder over snapshot dicts and statement JSON payloads.
#[pyclass]
pub struct PyRecordBuilder {
    inner: RecordBuilder,
}

#[pymethods]
impl PyRecordBuilder {
    #[new]
    #[pyo3(signature = (decimals = 1))]
    fn new(decimals: usize) -> PyResult<Self> {
        let mut config = RustConfig::default();
        config.format.decimals = decimals;
        config.validate().map_err(to_py_err)?;
        Ok(PyRecordBuilder {
            inner: RecordBuilder::new(&config),
        })
    }

    /// Create from a JSON configuration document.
    #[staticmethod]
    fn from_config_json(json: &str) -> PyResult<Self> {
        let config = RustConfig::from_json_str(json).map_err(to_py_err)?;
        Ok(PyRecordBuilder {
            inner: RecordBuilder::new(&config),
        })
    }

    /// Build a record from a snapshot dict and optional statement payloads.
    #[pyo3(signature = (ticker, snapshot, annual_income_json = None, earnings_estimates_json = None))]
    fn build(
        &self,
        ticker: &str,
        snapshot: HashMap<String, String>,
        annual_income_json: Option<&str>,
        earnings_estimates_json: Option<&str>,
    ) -> PyResult<StockRecord> {
        let annual = parse_table(annual_income_json)?;
        let estimates = parse_table(earnings_estimates_json)?;
        Ok(self
            .inner
            .build_parts(ticker, &snapshot, annual.as_ref(), estimates.as_ref())
            .into())
    }

    /// Build records from a JSON array of stock inputs.
    fn build_batch_json(&self, inputs_json: &str) -> PyResult<Vec<StockRecord>> {
        let inputs: Vec<StockInput> = serde_json::from_str(inputs_json)
            .map_err(|e| to_py_err(RustError::from(e)))?;
        Ok(self
            .inner
            .build_all(&inputs)
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    /// Build the published list: small caps dropped, sorted by ticker.
    fn build_report_json(&self, inputs_json: &str) -> PyResult<Vec<StockRecord>> {
        let inputs: Vec<StockInput> = serde_json::from_str(inputs_json)
            .map_err(|e| to_py_err(RustError::from(e)))?;
        Ok(self
            .inner
            .build_report(&inputs)
            .into_iter()
            .map(|r| r.into())
            .collect())
    }
}

// ============================================================================
// Python-exposed Functions
// ============================================================================

/// Parse "1.23T" / "5.2B" / "850M" into billions, or None.
#[pyfunction]
fn parse_magnitude(token: &str) -> Option<f64> {
    magnitude::parse_magnitude(token)
}

/// Market cap bucket label for a value in billions.
#[pyfunction]
#[pyo3(signature = (billions = None))]
fn classify(billions: Option<f64>) -> &'static str {
    magnitude::classify(billions).as_str()
}

/// Signed growth percentage string, or "-".
#[pyfunction]
#[pyo3(signature = (current, prior, decimals = 1))]
fn growth_percent(current: Option<f64>, prior: Option<f64>, decimals: usize) -> String {
    GrowthCalculator::new(decimals).growth_percent(current, prior)
}

/// All percentage tokens in a compound field, left to right.
#[pyfunction]
fn split_percent_tokens(raw: &str) -> Vec<String> {
    compound::split_percent_tokens(raw)
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Module Definition
// ============================================================================

/// Stock Tracker Core - Rust normalization engine for Python.
#[pymodule]
fn stock_tracker_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<StockRecord>()?;

    // Engine classes
    m.add_class::<PyRecordBuilder>()?;

    // Functions
    m.add_function(wrap_pyfunction!(parse_magnitude, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(growth_percent, m)?)?;
    m.add_function(wrap_pyfunction!(split_percent_tokens, m)?)?;

    Ok(())
}
