//! Normalized record builder.
//!
//! Combines snapshot fields and statement-derived metrics into one
//! fixed-shape display record.

use crate::{
    annual_income::AnnualIncomeParser,
    earnings::EarningsEstimatesParser,
    growth::{format_count, GrowthCalculator},
    magnitude::{classify, parse_magnitude},
};
use tracker_core::{
    AnnualIncomeMetrics, CapCategory, Config, EarningsEstimateMetrics, NormalizedStockRecord,
    RawStatementTable, SnapshotKeyConfig, SnapshotRecord, StockInput, PLACEHOLDER,
};
use tracker_ingestion::{is_placeholder, split_pair};
use tracing::{debug, trace};

/// Builds normalized records. Holds only configuration, so one builder can
/// be shared across threads and reused for any number of entities.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    keys: SnapshotKeyConfig,
    growth: GrowthCalculator,
    annual: AnnualIncomeParser,
    estimates: EarningsEstimatesParser,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl RecordBuilder {
    /// Create a record builder from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            keys: config.snapshot_keys.clone(),
            growth: GrowthCalculator::from_config(config),
            annual: AnnualIncomeParser::new(config),
            estimates: EarningsEstimatesParser::new(config),
        }
    }

    /// Build the record for one entity.
    pub fn build(&self, input: &StockInput) -> NormalizedStockRecord {
        self.build_parts(
            &input.ticker,
            &input.fundament,
            input.annual_income.as_ref(),
            input.earnings_estimates.as_ref(),
        )
    }

    /// Build records for a batch, preserving input order.
    pub fn build_all(&self, inputs: &[StockInput]) -> Vec<NormalizedStockRecord> {
        inputs.iter().map(|input| self.build(input)).collect()
    }

    /// Build the published list for a batch: see [`finalize_batch`].
    pub fn build_report(&self, inputs: &[StockInput]) -> Vec<NormalizedStockRecord> {
        finalize_batch(self.build_all(inputs))
    }

    /// Build a record from its separate inputs.
    pub fn build_parts(
        &self,
        ticker: &str,
        snapshot: &SnapshotRecord,
        annual_income: Option<&RawStatementTable>,
        earnings_estimates: Option<&RawStatementTable>,
    ) -> NormalizedStockRecord {
        let annual = annual_income
            .map(|t| self.annual.parse(t))
            .unwrap_or_default();
        let quarterly = earnings_estimates
            .map(|t| self.estimates.parse(t))
            .unwrap_or_default();
        self.assemble(ticker, snapshot, &annual, &quarterly)
    }

    /// Assemble a record from a snapshot and already-derived metrics.
    pub fn assemble(
        &self,
        ticker: &str,
        snapshot: &SnapshotRecord,
        annual: &AnnualIncomeMetrics,
        quarterly: &EarningsEstimateMetrics,
    ) -> NormalizedStockRecord {
        let keys = &self.keys;
        let pct = |v: Option<f64>| self.growth.format(v);

        let market_cap = lookup(snapshot, &keys.market_cap);
        let cap_category = classify(market_cap.and_then(parse_magnitude));

        let (eps_surpr, sales_surpr) = lookup(snapshot, &keys.surprise)
            .map(split_pair)
            .unwrap_or((None, None));

        let record = NormalizedStockRecord {
            ticker: display(Some(ticker)),
            market_cap: display(market_cap),
            cap_category,
            next_earnings: display(lookup(snapshot, &keys.next_earnings)),
            eps_yy_ttm: snapshot_or(snapshot, &keys.eps_yy_ttm, || pct(annual.eps_yy_ttm)),
            sales_yy_ttm: display(lookup(snapshot, &keys.sales_yy_ttm)),
            eps_q_rep: snapshot_or(snapshot, &keys.eps_q_q, || pct(quarterly.eps_q_rep)),
            sales_q_rep: snapshot_or(snapshot, &keys.sales_q_q, || pct(quarterly.rev_q_rep)),
            eps_surpr: display(eps_surpr),
            sales_surpr: display(sales_surpr),
            avg_target_price: display(lookup(snapshot, &keys.target_price)),
            rev_ann_rep: pct(annual.rev_ann_rep),
            rev_ann_est_cur: pct(annual.rev_ann_est_cur),
            rev_ann_est_fut: pct(annual.rev_ann_est_fut),
            eps_q_est: pct(quarterly.eps_q_est),
            rev_q_est: pct(quarterly.rev_q_est),
            rev_q_rep: pct(quarterly.rev_q_rep),
            eps_revisions_up: format_count(quarterly.eps_revisions_up),
            eps_revisions_down: format_count(quarterly.eps_revisions_down),
            sales_revisions_up: format_count(quarterly.sales_revisions_up),
            sales_revisions_down: format_count(quarterly.sales_revisions_down),
        };

        debug!(
            ticker = %record.ticker,
            market_cap = %record.market_cap,
            category = %record.cap_category,
            "normalized record"
        );
        record
    }
}

/// Drop `Under $2B` records and order the rest by ticker.
///
/// Records whose market cap could not be parsed (`Unknown`) are kept.
pub fn finalize_batch(records: Vec<NormalizedStockRecord>) -> Vec<NormalizedStockRecord> {
    let total = records.len();
    let mut kept: Vec<_> = records
        .into_iter()
        .filter(|r| r.cap_category != CapCategory::Under2B)
        .collect();
    kept.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    debug!(total, kept = kept.len(), "finalized batch");
    kept
}

/// First present value among `keys`, trimmed.
fn lookup<'a>(snapshot: &'a SnapshotRecord, keys: &[String]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| snapshot.get(k))
        .map(|v| v.trim())
        .find(|v| !is_placeholder(v))
}

/// Missing-safe accessor: every output string passes through here.
fn display(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !is_placeholder(v) => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Snapshot value if present, otherwise the statement-derived fallback.
fn snapshot_or(
    snapshot: &SnapshotRecord,
    keys: &[String],
    fallback: impl FnOnce() -> String,
) -> String {
    match lookup(snapshot, keys) {
        Some(v) => display(Some(v)),
        None => {
            trace!(keys = ?keys, "snapshot field absent, using statement value");
            let derived = fallback();
            display(Some(derived.as_str()))
        }
    }
}
