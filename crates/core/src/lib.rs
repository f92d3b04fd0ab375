//! Core types and configuration for the stock-tracker engine.
//!
//! This crate provides shared types used across all other crates:
//! - Raw inputs (statement tables, snapshots) and the normalized record
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, FormatConfig, RowLabelConfig, SnapshotKeyConfig};
pub use error::{Error, Result};
pub use types::*;
