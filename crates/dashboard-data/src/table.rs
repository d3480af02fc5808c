//! Columnar table built from a comma-separated sales export.
//!
//! A [`Table`] is constructed once per load and never mutated; filtering
//! produces a fresh value. Parsing is deliberately minimal: a literal
//! comma split with no quoting support, matching the format of the
//! supermarket sales export.

use std::collections::HashMap;
use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::schema::{self, CoercionPolicy};
use serde::Serialize;
use tracing::{debug, warn};

// ── Column ────────────────────────────────────────────────────────────────────

/// A homogeneous column: text for categorical data, floats for numeric.
///
/// Which variant a column gets is fixed by its name via
/// [`schema::is_numeric_column`], never inferred from the cell contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<String>),
    Number(Vec<f64>),
}

impl Column {
    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Basic statistics over a loaded table.
///
/// `average_rating` is NaN for a zero-row table; callers rendering it as a
/// metric must check `rows` first.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub total_sales: f64,
    pub average_rating: f64,
    pub total_quantity: f64,
    pub branches: usize,
    pub cities: usize,
    pub product_lines: usize,
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Immutable columnar dataset produced by a single load.
#[derive(Debug, Clone)]
pub struct Table {
    column_names: Vec<String>,
    columns: HashMap<String, Column>,
    row_count: usize,
    coerced_values: usize,
}

impl Table {
    /// Parse `raw` into a cleaned table.
    ///
    /// The first line is the header; every subsequent line is a data row.
    /// Short rows are padded with empty strings and extra trailing fields
    /// are ignored. Rows where any of [`schema::REQUIRED_COLUMNS`] is empty
    /// are dropped, then the [`schema::NUMERIC_COLUMNS`] are coerced to
    /// floats under `policy`.
    ///
    /// Only a structurally empty input fails; individual bad values are
    /// handled by the coercion policy.
    pub fn load(raw: &str, policy: CoercionPolicy) -> Result<Table> {
        let mut lines = raw.lines();
        let Some(header_line) = lines.next() else {
            return Err(DashboardError::Format(
                "input contains no header line".to_string(),
            ));
        };

        let column_names: Vec<String> = header_line
            .trim()
            .split(',')
            .map(|s| s.to_string())
            .collect();

        // Parse every data line into per-column string cells, padding short
        // rows so each column stays the same length.
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); column_names.len()];
        let mut raw_rows = 0usize;
        for line in lines {
            let values: Vec<&str> = line.trim().split(',').collect();
            for (i, cells) in raw_columns.iter_mut().enumerate() {
                cells.push(values.get(i).copied().unwrap_or("").to_string());
            }
            raw_rows += 1;
        }
        debug!("Parsed {} raw rows, {} columns", raw_rows, column_names.len());

        // Validity mask: a row survives only when every required column that
        // exists in this file is non-empty. Missing required columns impose
        // no constraint, matching the lenient absent-column policy.
        let mut valid = vec![true; raw_rows];
        for required in schema::REQUIRED_COLUMNS {
            if let Some(idx) = column_names.iter().position(|n| n == required) {
                for (row, cell) in raw_columns[idx].iter().enumerate() {
                    if cell.is_empty() {
                        valid[row] = false;
                    }
                }
            }
        }

        let retained = valid.iter().filter(|v| **v).count();
        if retained < raw_rows {
            warn!("Removed {} rows with missing data", raw_rows - retained);
        }
        let raw_columns: Vec<Vec<String>> = raw_columns
            .into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .zip(&valid)
                    .filter(|(_, keep)| **keep)
                    .map(|(cell, _)| cell)
                    .collect()
            })
            .collect();

        // Coerce numeric columns after filtering, so dropped rows never
        // contribute parse failures.
        let mut columns: HashMap<String, Column> = HashMap::new();
        let mut coerced_values = 0usize;
        for (name, cells) in column_names.iter().zip(raw_columns) {
            let column = if schema::is_numeric_column(name) {
                let mut numbers = Vec::with_capacity(cells.len());
                for cell in &cells {
                    let (value, coerced) = policy.coerce(name, cell)?;
                    if coerced {
                        coerced_values += 1;
                    }
                    numbers.push(value);
                }
                Column::Number(numbers)
            } else {
                Column::Text(cells)
            };
            columns.insert(name.clone(), column);
        }

        if coerced_values > 0 {
            warn!("Substituted 0.0 for {} unparsable numeric values", coerced_values);
        }
        debug!("Final dataset: {} clean rows", retained);

        Ok(Table {
            column_names,
            columns,
            row_count: retained,
            coerced_values,
        })
    }

    /// Read `path` and load it as a table.
    pub fn load_file(path: &Path, policy: CoercionPolicy) -> Result<Table> {
        let raw = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&raw, policy)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows remaining after the validity filter.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of numeric cells that were silently defaulted to `0.0` during
    /// the load. Always `0` for derived (filtered) tables.
    pub fn coerced_values(&self) -> usize {
        self.coerced_values
    }

    /// The column named `name`, or `None` when absent.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Text cells of a categorical column; empty slice when the column is
    /// absent or numeric.
    pub fn text(&self, name: &str) -> &[String] {
        match self.columns.get(name) {
            Some(Column::Text(v)) => v,
            _ => &[],
        }
    }

    /// Float cells of a numeric column; empty slice when the column is
    /// absent or categorical.
    pub fn numbers(&self, name: &str) -> &[f64] {
        match self.columns.get(name) {
            Some(Column::Number(v)) => v,
            _ => &[],
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Distinct values of a categorical column, lexicographically ascending.
    pub fn unique_text(&self, name: &str) -> Vec<String> {
        let mut values: Vec<String> = self.text(name).to_vec();
        values.sort();
        values.dedup();
        values
    }

    /// Distinct values of a numeric column, numerically ascending.
    pub fn unique_numbers(&self, name: &str) -> Vec<f64> {
        let mut values: Vec<f64> = self.numbers(name).to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }

    /// A new table containing exactly the rows where `name` equals `value`,
    /// in the original relative order.
    ///
    /// For a numeric column `value` is parsed as a float and compared for
    /// equality; an unparsable `value` or an absent column yields a
    /// zero-row table.
    pub fn filter_by_value(&self, name: &str, value: &str) -> Table {
        let mask: Vec<bool> = match self.columns.get(name) {
            Some(Column::Text(cells)) => cells.iter().map(|c| c == value).collect(),
            Some(Column::Number(cells)) => match value.trim().parse::<f64>() {
                Ok(wanted) => cells.iter().map(|c| *c == wanted).collect(),
                Err(_) => vec![false; self.row_count],
            },
            None => vec![false; self.row_count],
        };

        let retained = mask.iter().filter(|m| **m).count();
        let mut columns: HashMap<String, Column> = HashMap::new();
        for (column_name, column) in &self.columns {
            let filtered = match column {
                Column::Text(cells) => Column::Text(
                    cells
                        .iter()
                        .zip(&mask)
                        .filter(|(_, keep)| **keep)
                        .map(|(c, _)| c.clone())
                        .collect(),
                ),
                Column::Number(cells) => Column::Number(
                    cells
                        .iter()
                        .zip(&mask)
                        .filter(|(_, keep)| **keep)
                        .map(|(c, _)| *c)
                        .collect(),
                ),
            };
            columns.insert(column_name.clone(), filtered);
        }

        Table {
            column_names: self.column_names.clone(),
            columns,
            row_count: retained,
            coerced_values: 0,
        }
    }

    /// Basic statistics over the table.
    pub fn summary(&self) -> Summary {
        let totals = self.numbers(schema::COL_TOTAL);
        let ratings = self.numbers(schema::COL_RATING);
        let quantities = self.numbers(schema::COL_QUANTITY);

        Summary {
            rows: self.row_count,
            total_sales: totals.iter().sum(),
            average_rating: mean(ratings),
            total_quantity: quantities.iter().sum(),
            branches: self.unique_text(schema::COL_BRANCH).len(),
            cities: self.unique_text(schema::COL_CITY).len(),
            product_lines: self.unique_text(schema::COL_PRODUCT_LINE).len(),
        }
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
