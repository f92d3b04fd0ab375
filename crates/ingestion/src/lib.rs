//! Data ingestion and cleaning for the stock-tracker engine.
//!
//! This crate handles:
//! - Numeric coercion of dirty string tokens
//! - Statement row maps and label resolution
//! - Reported/estimate column classification
//! - Compound percentage field splitting

pub mod coerce;
pub mod columns;
pub mod compound;
pub mod row_map;

pub use coerce::{first_numeric, is_placeholder, last_numeric, to_number};
pub use columns::{ColumnClassification, PartitionedValues};
pub use compound::{split_pair, split_percent_tokens};
pub use row_map::RowMap;
