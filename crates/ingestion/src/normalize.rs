//! Type normalization.
//!
//! Coerces the fixed list of numeric columns to numbers. Cells that fail
//! coercion become `Missing`; columns absent from the table are skipped.
//! Any other column whose non-missing cells all parse as numbers is stored
//! as numbers too. The trade date column is always left as text.

use tracing::{debug, info};
use winedata_core::{columns, FieldValue, Table};

/// Statistics about a normalization pass.
#[derive(Debug, Clone, Default)]
pub struct NormalizationStats {
    /// Numeric columns found in the table.
    pub columns_coerced: usize,
    /// Numeric columns not present in the table.
    pub columns_skipped: usize,
    /// Cells converted to numbers.
    pub cells_coerced: u64,
    /// Non-empty cells that failed coercion and were set to `Missing`.
    pub cells_invalid: u64,
    /// Other columns found to be entirely numeric and converted.
    pub columns_inferred: usize,
}

impl NormalizationStats {
    /// Fraction of non-empty numeric cells that were invalid.
    pub fn invalid_frac(&self) -> f64 {
        let total = self.cells_coerced + self.cells_invalid;
        if total > 0 {
            self.cells_invalid as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Parse a numeric cell. Surrounding whitespace is ignored; anything that is
/// not a finite decimal number is `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a single cell in place. `None` for cells that were already missing,
/// `Some(false)` when a non-empty cell was dropped to `Missing`.
fn coerce_cell(cell: &mut FieldValue) -> Option<bool> {
    let coerced = match cell {
        FieldValue::Missing => return None,
        FieldValue::Number(v) => FieldValue::from_f64(*v),
        FieldValue::Text(s) => parse_numeric(s).map_or(FieldValue::Missing, FieldValue::Number),
    };
    let ok = !coerced.is_missing();
    *cell = coerced;
    Some(ok)
}

/// Coerce the numeric columns of `table` in place.
pub fn normalize_types(table: &mut Table) -> NormalizationStats {
    let mut stats = NormalizationStats::default();

    let targets: Vec<(usize, &str)> = columns::NUMERIC
        .iter()
        .filter_map(|&name| match table.column_index(name) {
            Some(idx) => Some((idx, name)),
            None => {
                debug!(column = name, "numeric column not present, skipping");
                stats.columns_skipped += 1;
                None
            }
        })
        .collect();
    stats.columns_coerced = targets.len();

    for row in table.rows_mut() {
        for &(idx, _) in &targets {
            match coerce_cell(&mut row[idx]) {
                Some(true) => stats.cells_coerced += 1,
                Some(false) => stats.cells_invalid += 1,
                None => {}
            }
        }
    }

    let inferred: Vec<usize> = (0..table.headers().len())
        .filter(|idx| !targets.iter().any(|&(t, _)| t == *idx))
        .filter(|&idx| table.headers()[idx] != columns::LAST_TRADE_DATE)
        .filter(|&idx| is_numeric_column(table, idx))
        .collect();
    for &idx in &inferred {
        debug!(column = %table.headers()[idx], "inferred numeric column");
    }
    for row in table.rows_mut() {
        for &idx in &inferred {
            coerce_cell(&mut row[idx]);
        }
    }
    stats.columns_inferred = inferred.len();

    info!(
        columns = stats.columns_coerced,
        skipped = stats.columns_skipped,
        inferred = stats.columns_inferred,
        coerced = stats.cells_coerced,
        invalid = stats.cells_invalid,
        invalid_frac = stats.invalid_frac(),
        "normalized numeric columns"
    );
    stats
}

/// A column is numeric when it has at least one value and every value parses.
fn is_numeric_column(table: &Table, idx: usize) -> bool {
    let mut any = false;
    for row in table.rows() {
        match &row[idx] {
            FieldValue::Missing => {}
            FieldValue::Number(_) => any = true,
            FieldValue::Text(s) => {
                if parse_numeric(s).is_none() {
                    return false;
                }
                any = true;
            }
        }
    }
    any
}
