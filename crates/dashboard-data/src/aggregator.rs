//! Grouped aggregate queries over a loaded sales [`Table`].
//!
//! Every function here is a pure read over an immutable table and may be
//! recomputed or cached freely by the presentation layer. Grouping runs as
//! a single pass over the rows with a `BTreeMap` accumulator, so group
//! labels come out in ascending order by construction.

use std::collections::BTreeMap;

use dashboard_core::schema;
use serde::Serialize;

use crate::table::{mean, Table};

// ── Result types ──────────────────────────────────────────────────────────────

/// Parallel label/value sequences produced by a grouped query.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// Group labels, aligned by index with `values`.
    pub labels: Vec<String>,
    /// One numeric value per label (a sum or a count depending on the query).
    pub values: Vec<f64>,
}

/// Per-group revenue and transaction count, e.g. Member vs Normal customers.
#[derive(Debug, Clone, Serialize)]
pub struct GroupBreakdown {
    pub labels: Vec<String>,
    pub totals: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Right-open histogram of the Rating column.
///
/// `edges` has one more element than `counts`; bin `i` covers
/// `[edges[i], edges[i + 1])`.
#[derive(Debug, Clone, Serialize)]
pub struct RatingHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Top-level dashboard metrics.
///
/// The means and the max/min are NaN for a zero-row table; the presentation
/// layer must check `total_transactions` before rendering them.
#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_transactions: u64,
    pub average_transaction: f64,
    pub total_items_sold: f64,
    pub average_rating: f64,
    pub max_transaction: f64,
    pub min_transaction: f64,
}

// ── Rating histogram bins ─────────────────────────────────────────────────────

/// The rating domain of the export is 4–10, binned in 0.5 steps.
const RATING_MIN: f64 = 4.0;
const RATING_MAX: f64 = 10.0;
const RATING_BIN_WIDTH: f64 = 0.5;
const RATING_BIN_COUNT: usize = 12;

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that computes the dashboard aggregates.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Sum of Total per branch, branches in ascending order.
    pub fn sales_by_branch(table: &Table) -> AggregateResult {
        Self::grouped_sum(table, schema::COL_BRANCH, schema::COL_TOTAL)
    }

    /// Sum of Total per city, cities in ascending order.
    pub fn sales_by_city(table: &Table) -> AggregateResult {
        Self::grouped_sum(table, schema::COL_CITY, schema::COL_TOTAL)
    }

    /// Sum of Total per product line, lines in ascending order.
    pub fn sales_by_product_line(table: &Table) -> AggregateResult {
        Self::grouped_sum(table, schema::COL_PRODUCT_LINE, schema::COL_TOTAL)
    }

    /// Number of transactions per payment method.
    ///
    /// Values are row counts represented as floats for chart uniformity.
    pub fn payment_method_distribution(table: &Table) -> AggregateResult {
        let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
        for method in table.text(schema::COL_PAYMENT) {
            *groups.entry(method.as_str()).or_insert(0) += 1;
        }
        AggregateResult {
            labels: groups.keys().map(|k| k.to_string()).collect(),
            values: groups.values().map(|c| *c as f64).collect(),
        }
    }

    /// Revenue and transaction count per customer type (Member vs Normal).
    pub fn customer_type_analysis(table: &Table) -> GroupBreakdown {
        Self::grouped_breakdown(table, schema::COL_CUSTOMER_TYPE, schema::COL_TOTAL)
    }

    /// Revenue and transaction count per gender.
    pub fn gender_analysis(table: &Table) -> GroupBreakdown {
        Self::grouped_breakdown(table, schema::COL_GENDER, schema::COL_TOTAL)
    }

    /// Histogram of the Rating column over [4.0, 10.0) in 0.5-wide bins.
    ///
    /// Binning is right-open; ratings outside the domain fall in no bin.
    pub fn rating_distribution(table: &Table) -> RatingHistogram {
        let mut counts = vec![0u64; RATING_BIN_COUNT];
        for rating in table.numbers(schema::COL_RATING) {
            if *rating >= RATING_MIN && *rating < RATING_MAX {
                let bin = ((rating - RATING_MIN) / RATING_BIN_WIDTH) as usize;
                counts[bin.min(RATING_BIN_COUNT - 1)] += 1;
            }
        }
        let edges = (0..=RATING_BIN_COUNT)
            .map(|i| RATING_MIN + i as f64 * RATING_BIN_WIDTH)
            .collect();
        RatingHistogram { edges, counts }
    }

    /// Sum of Total per calendar month, months in numeric order.
    ///
    /// The month key is the literal first `/`-separated token of the Date
    /// cell; rows whose token does not parse as an integer are skipped.
    /// Months 1–12 are labelled with their English names, anything else
    /// passes through as its decimal string.
    pub fn monthly_sales_trend(table: &Table) -> AggregateResult {
        let dates = table.text(schema::COL_DATE);
        let totals = table.numbers(schema::COL_TOTAL);

        let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
        for (i, date) in dates.iter().enumerate() {
            let token = date.split('/').next().unwrap_or("");
            let Ok(month) = token.parse::<u32>() else {
                continue;
            };
            let total = totals.get(i).copied().unwrap_or(0.0);
            *by_month.entry(month).or_insert(0.0) += total;
        }

        AggregateResult {
            labels: by_month
                .keys()
                .map(|m| match schema::month_name(*m) {
                    Some(name) => name.to_string(),
                    None => m.to_string(),
                })
                .collect(),
            values: by_month.into_values().collect(),
        }
    }

    /// The `n` best-selling product lines, descending by revenue.
    ///
    /// The sort is stable, so lines with equal revenue keep their ascending
    /// unique-value order. Returns fewer than `n` entries when there are
    /// fewer product lines.
    pub fn top_products(table: &Table, n: usize) -> AggregateResult {
        let by_line = Self::sales_by_product_line(table);
        let mut pairs: Vec<(String, f64)> = by_line
            .labels
            .into_iter()
            .zip(by_line.values)
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        pairs.truncate(n);

        let (labels, values) = pairs.into_iter().unzip();
        AggregateResult { labels, values }
    }

    /// Mean quantity per transaction; NaN for an empty table.
    pub fn average_basket_size(table: &Table) -> f64 {
        mean(table.numbers(schema::COL_QUANTITY))
    }

    /// Mean amount spent per transaction; NaN for an empty table.
    pub fn average_transaction_value(table: &Table) -> f64 {
        mean(table.numbers(schema::COL_TOTAL))
    }

    /// The headline dashboard metrics.
    pub fn kpis(table: &Table) -> Kpis {
        let totals = table.numbers(schema::COL_TOTAL);
        let quantities = table.numbers(schema::COL_QUANTITY);
        let ratings = table.numbers(schema::COL_RATING);

        Kpis {
            total_revenue: totals.iter().sum(),
            total_transactions: totals.len() as u64,
            average_transaction: mean(totals),
            total_items_sold: quantities.iter().sum(),
            average_rating: mean(ratings),
            max_transaction: totals.iter().copied().fold(f64::NAN, f64::max),
            min_transaction: totals.iter().copied().fold(f64::NAN, f64::min),
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Single-pass grouped sum of `value_column` keyed by `key_column`.
    ///
    /// An absent key column yields an empty result; a missing value for a
    /// row contributes 0.0 to its group.
    fn grouped_sum(table: &Table, key_column: &str, value_column: &str) -> AggregateResult {
        let keys = table.text(key_column);
        let values = table.numbers(value_column);

        let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            let value = values.get(i).copied().unwrap_or(0.0);
            *groups.entry(key.as_str()).or_insert(0.0) += value;
        }

        AggregateResult {
            labels: groups.keys().map(|k| k.to_string()).collect(),
            values: groups.into_values().collect(),
        }
    }

    /// Like [`Self::grouped_sum`] but also counts the rows per group.
    fn grouped_breakdown(table: &Table, key_column: &str, value_column: &str) -> GroupBreakdown {
        let keys = table.text(key_column);
        let values = table.numbers(value_column);

        let mut groups: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            let value = values.get(i).copied().unwrap_or(0.0);
            let entry = groups.entry(key.as_str()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }

        GroupBreakdown {
            labels: groups.keys().map(|k| k.to_string()).collect(),
            totals: groups.values().map(|(t, _)| *t).collect(),
            counts: groups.values().map(|(_, c)| *c).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
