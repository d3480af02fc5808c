//! Presentation layer for the sales dashboard.
//!
//! Renders the aggregates computed by `dashboard-data` as a plain-text
//! terminal report: KPI block, bar charts, rating histogram and the
//! monthly trend. All formatting (currency symbols, separators) happens
//! here; the data layer only ever hands over raw numbers.

pub mod bar;
pub mod report;
