//! Table-wide derivation of `Price_to_use` and the relative-value columns.

use chrono::NaiveDate;
use tracing::{info, warn};
use winedata_core::{columns, FieldValue, Table};
use winedata_ingestion::ColumnMap;

use crate::regression::{LinearFit, LinearRegression};
use crate::resolver::{PriceResolver, ResolutionStats};

/// Compute `Price_to_use` for every row of `table`, in place.
///
/// The column is appended after the existing columns, or overwritten if the
/// input already carries one. Each row is resolved independently against
/// `today`.
pub fn derive_prices(table: &mut Table, resolver: &PriceResolver, today: NaiveDate) -> ResolutionStats {
    let map = ColumnMap::new(table);
    let target = table.ensure_column(columns::PRICE_TO_USE);
    let mut stats = ResolutionStats::default();

    for row in table.rows_mut() {
        let (price, source) = resolver.resolve_with_source(&map.extract(row), today);
        row[target] = FieldValue::from(price);
        stats.record(source);
    }

    info!(
        %today,
        cutoff_days = resolver.cutoff_days(),
        rows = stats.total_rows,
        last_trade = stats.last_trade,
        midpoint = stats.midpoint,
        bid_only = stats.bid_only,
        offer_only = stats.offer_only,
        unpriced = stats.unpriced,
        priced_fraction = stats.priced_fraction(),
        "derived {}",
        columns::PRICE_TO_USE
    );
    stats
}

/// Fit `Price_to_use` against `Score` and add `Predicted_Price` and
/// `Relative_Value` columns.
///
/// Rows without both a score and a price get `null` in both columns. When no
/// line can be fitted every row gets `null` and `None` is returned.
pub fn derive_relative_values(table: &mut Table) -> Option<LinearFit> {
    let map = ColumnMap::new(table);
    let price_idx = table.column_index(columns::PRICE_TO_USE);

    let points: Vec<Option<(f64, f64)>> = table
        .rows()
        .iter()
        .map(|row| {
            let score = map.extract(row).score?;
            let price = row.get(price_idx?)?.as_f64()?;
            Some((score, price))
        })
        .collect();

    let mut regression = LinearRegression::new();
    for &(score, price) in points.iter().flatten() {
        regression.add_point(score, price);
    }
    let fit = if regression.is_empty() { None } else { regression.fit() };

    let predicted_idx = table.ensure_column(columns::PREDICTED_PRICE);
    let relative_idx = table.ensure_column(columns::RELATIVE_VALUE);
    let mut undervalued = 0u64;

    for (row, point) in table.rows_mut().zip(&points) {
        let value = match (fit, point) {
            (Some(fit), Some((score, price))) => fit.relative_value(*price, *score),
            _ => None,
        };
        if value.is_some_and(|v| v.is_undervalued) {
            undervalued += 1;
        }
        row[predicted_idx] = FieldValue::from(value.map(|v| v.predicted_price));
        row[relative_idx] = FieldValue::from(value.map(|v| v.relative_value));
    }

    match fit {
        Some(fit) => info!(
            equation = %fit.equation(),
            r_squared = fit.r_squared,
            points = fit.points,
            undervalued,
            "fitted price against score"
        ),
        None => warn!(
            points = regression.len(),
            "not enough distinct scored rows to fit price against score"
        ),
    }
    fit
}
