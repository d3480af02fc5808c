//! Fixed column schema of the supermarket sales export.
//!
//! The column set is known up front; whether a column is numeric or
//! categorical is decided by name, never inferred from the data.

use crate::error::{DashboardError, Result};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_INVOICE_ID: &str = "Invoice ID";
pub const COL_BRANCH: &str = "Branch";
pub const COL_CITY: &str = "City";
pub const COL_CUSTOMER_TYPE: &str = "Customer type";
pub const COL_GENDER: &str = "Gender";
pub const COL_PRODUCT_LINE: &str = "Product line";
pub const COL_UNIT_PRICE: &str = "Unit price";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_TAX: &str = "Tax 5%";
pub const COL_TOTAL: &str = "Total";
pub const COL_DATE: &str = "Date";
pub const COL_TIME: &str = "Time";
pub const COL_PAYMENT: &str = "Payment";
pub const COL_COGS: &str = "cogs";
pub const COL_GROSS_MARGIN: &str = "gross margin percentage";
pub const COL_GROSS_INCOME: &str = "gross income";
pub const COL_RATING: &str = "Rating";

/// Columns stored as floating-point numbers.
pub const NUMERIC_COLUMNS: [&str; 8] = [
    COL_UNIT_PRICE,
    COL_QUANTITY,
    COL_TAX,
    COL_TOTAL,
    COL_COGS,
    COL_GROSS_MARGIN,
    COL_GROSS_INCOME,
    COL_RATING,
];

/// Columns that must be non-empty for a row to survive the validity filter.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_TOTAL, COL_QUANTITY, COL_RATING, COL_BRANCH];

/// Returns `true` when `name` designates a numeric column.
///
/// Matching is by exact, case-sensitive name.
pub fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

// ── Coercion policy ───────────────────────────────────────────────────────────

/// How to handle a numeric cell that fails to parse as a float.
///
/// The original pipeline silently substitutes `0.0`; that stays the default
/// so a dashboard is always produced, but callers who would rather surface
/// data-quality problems can opt into [`CoercionPolicy::Strict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Substitute `0.0` for any unparsable value.
    #[default]
    SilentZero,
    /// Fail the whole load on the first unparsable value.
    Strict,
}

impl CoercionPolicy {
    /// Coerce a raw cell to a float under this policy.
    ///
    /// Returns `(value, coerced)` where `coerced` is `true` when the silent
    /// default was substituted.
    pub fn coerce(&self, column: &str, raw: &str) -> Result<(f64, bool)> {
        match raw.trim().parse::<f64>() {
            Ok(v) => Ok((v, false)),
            Err(_) => match self {
                CoercionPolicy::SilentZero => Ok((0.0, true)),
                CoercionPolicy::Strict => Err(DashboardError::NumericParse {
                    column: column.to_string(),
                    value: raw.to_string(),
                }),
            },
        }
    }
}

// ── Month names ───────────────────────────────────────────────────────────────

/// English name for a month number, or `None` outside 1–12.
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1 => Some("January"),
        2 => Some("February"),
        3 => Some("March"),
        4 => Some("April"),
        5 => Some("May"),
        6 => Some("June"),
        7 => Some("July"),
        8 => Some("August"),
        9 => Some("September"),
        10 => Some("October"),
        11 => Some("November"),
        12 => Some("December"),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
