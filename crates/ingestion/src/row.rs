//! Typed row extraction.

use winedata_core::{columns, FieldValue, PriceRow, Table};

use crate::dates::parse_trade_date;
use crate::normalize::parse_numeric;

/// Column positions of the price-relevant fields, resolved once per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMap {
    last_trade_date: Option<usize>,
    last_trade_price: Option<usize>,
    bid: Option<usize>,
    offer: Option<usize>,
    vintage: Option<usize>,
    score: Option<usize>,
    da_start: Option<usize>,
    da_finish: Option<usize>,
    price: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions against a table's headers.
    pub fn new(table: &Table) -> Self {
        Self {
            last_trade_date: table.column_index(columns::LAST_TRADE_DATE),
            last_trade_price: table.column_index(columns::LAST_TRADE_PRICE),
            bid: table.column_index(columns::BID),
            offer: table.column_index(columns::OFFER),
            vintage: table.column_index(columns::VINTAGE),
            score: table.column_index(columns::SCORE),
            da_start: table.column_index(columns::DA_START),
            da_finish: table.column_index(columns::DA_FINISH),
            price: table.column_index(columns::PRICE),
        }
    }

    /// Build the typed view of one row.
    pub fn extract(&self, row: &[FieldValue]) -> PriceRow {
        let num = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(numeric_value);

        PriceRow {
            last_trade_date: self
                .last_trade_date
                .and_then(|i| row.get(i))
                .and_then(FieldValue::as_str)
                .and_then(parse_trade_date),
            last_trade_price: num(self.last_trade_price),
            bid: num(self.bid),
            offer: num(self.offer),
            vintage: num(self.vintage),
            score: num(self.score),
            da_start: num(self.da_start),
            da_finish: num(self.da_finish),
            price: num(self.price),
        }
    }
}

fn numeric_value(cell: &FieldValue) -> Option<f64> {
    match cell {
        FieldValue::Number(v) => Some(*v),
        FieldValue::Text(s) => parse_numeric(s),
        FieldValue::Missing => None,
    }
}
