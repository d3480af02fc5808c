//! Shared domain layer for the sales dashboard.
//!
//! Holds the fixed column schema of the supermarket sales export, the
//! numeric-coercion policy, the error taxonomy, number formatting helpers
//! and the CLI settings.

pub mod error;
pub mod formatting;
pub mod schema;
pub mod settings;

pub use error::{DashboardError, Result};
