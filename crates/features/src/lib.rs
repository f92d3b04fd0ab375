//! Derived metrics and record building for the stock-tracker engine.
//!
//! This crate handles:
//! - Growth (YoY / QoQ) calculation and formatting
//! - Market cap scale parsing and bucketing
//! - Annual income statement parsing
//! - Earnings / estimates statement parsing
//! - Normalized record assembly

pub mod growth;
pub mod magnitude;
pub mod annual_income;
pub mod earnings;
pub mod engine;

pub use growth::GrowthCalculator;
pub use magnitude::{classify, parse_magnitude};
pub use annual_income::AnnualIncomeParser;
pub use earnings::EarningsEstimatesParser;
pub use engine::{finalize_batch, RecordBuilder};
