//! Data layer for the sales dashboard.
//!
//! Responsible for parsing the comma-separated sales export into an
//! immutable columnar [`table::Table`], dropping rows with missing
//! required fields, coercing numeric columns, and computing the grouped
//! aggregates consumed by the presentation layer.

pub mod aggregator;
pub mod table;

pub use dashboard_core as core;
