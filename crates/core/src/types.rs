//! Core data types for the wine dataset builder.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Column names understood by the pipeline.
pub mod columns {
    /// Date of the most recent trade.
    pub const LAST_TRADE_DATE: &str = "Last_Trade_Date";
    /// Price of the most recent trade.
    pub const LAST_TRADE_PRICE: &str = "Last_Trade_Price";
    /// Best bid per case.
    pub const BID: &str = "Bid_Per_Case";
    /// Best offer per case.
    pub const OFFER: &str = "Offer_Per_Case";
    /// Vintage year.
    pub const VINTAGE: &str = "Vintage";
    /// Critic score.
    pub const SCORE: &str = "Score";
    /// Start of the drinking window.
    pub const DA_START: &str = "DA Start";
    /// End of the drinking window.
    pub const DA_FINISH: &str = "DA Finish";
    /// List price.
    pub const PRICE: &str = "Price";
    /// Derived price column appended by the pricing stage.
    pub const PRICE_TO_USE: &str = "Price_to_use";
    /// Price predicted from the score regression.
    pub const PREDICTED_PRICE: &str = "Predicted_Price";
    /// Percentage by which the predicted price exceeds `Price_to_use`.
    pub const RELATIVE_VALUE: &str = "Relative_Value";

    /// Columns coerced to numbers during normalization.
    pub const NUMERIC: [&str; 8] = [
        VINTAGE,
        SCORE,
        DA_START,
        DA_FINISH,
        LAST_TRADE_PRICE,
        BID,
        OFFER,
        PRICE,
    ];
}

/// Cell texts read as missing values, in addition to the empty string.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Empty or uncoercible cell. Serialized as `null`.
    Missing,
    /// Finite number.
    Number(f64),
    /// Raw text.
    Text(String),
}

impl FieldValue {
    /// Build a text cell, mapping empty input and NA markers to `Missing`.
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() || NA_MARKERS.contains(&raw) {
            FieldValue::Missing
        } else {
            FieldValue::Text(raw.to_string())
        }
    }

    /// Build a number cell, mapping non-finite values to `Missing`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            FieldValue::Number(value)
        } else {
            FieldValue::Missing
        }
    }

    /// Is this cell missing?
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Numeric value, if this cell holds one.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value, if this cell holds one.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::from_f64)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing => serializer.serialize_none(),
            FieldValue::Number(v) => serializer.serialize_f64(*v),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// An ordered table of cells with named columns.
///
/// Every row holds exactly one cell per header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Column names in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    /// Mutable access to rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [FieldValue]> {
        self.rows.iter_mut().map(|r| r.as_mut_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Append a row. Short rows are padded with `Missing`; long rows are rejected.
    pub fn push_row(&mut self, mut values: Vec<FieldValue>) -> Result<()> {
        if values.len() > self.headers.len() {
            return Err(Error::data(format!(
                "row {} has {} fields, expected at most {}",
                self.rows.len() + 1,
                values.len(),
                self.headers.len()
            )));
        }
        values.resize(self.headers.len(), FieldValue::Missing);
        self.rows.push(values);
        Ok(())
    }

    /// Cell at `row` in column `name`, if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&FieldValue> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Return the index of `name`, appending a `Missing`-filled column if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(FieldValue::Missing);
        }
        self.headers.len() - 1
    }
}

/// Typed view of the price-relevant fields of one row.
///
/// Absent columns and uncoercible cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceRow {
    /// Calendar date of the most recent trade.
    pub last_trade_date: Option<NaiveDate>,
    /// Price of the most recent trade.
    pub last_trade_price: Option<f64>,
    /// Bid per case.
    pub bid: Option<f64>,
    /// Offer per case.
    pub offer: Option<f64>,
    /// Vintage year.
    pub vintage: Option<f64>,
    /// Critic score.
    pub score: Option<f64>,
    /// Drinking window start.
    pub da_start: Option<f64>,
    /// Drinking window end.
    pub da_finish: Option<f64>,
    /// List price.
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["Name".into(), "Price".into()]);
        table
            .push_row(vec![FieldValue::from_text("Margaux"), FieldValue::Number(450.0)])
            .unwrap();
        table
    }

    #[test]
    fn test_from_text_empty_is_missing() {
        assert_eq!(FieldValue::from_text(""), FieldValue::Missing);
        assert_eq!(FieldValue::from_text("x"), FieldValue::Text("x".into()));
    }

    #[test]
    fn test_from_text_na_markers_are_missing() {
        for marker in ["NA", "N/A", "null", "None", "nan", "#N/A", "NULL", "<NA>"] {
            assert!(FieldValue::from_text(marker).is_missing(), "{marker}");
        }
        assert_eq!(FieldValue::from_text("Nancy"), FieldValue::Text("Nancy".into()));
        assert_eq!(FieldValue::from_text("na"), FieldValue::Text("na".into()));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(FieldValue::from_f64(f64::NAN).is_missing());
        assert!(FieldValue::from_f64(f64::INFINITY).is_missing());
        assert_eq!(FieldValue::from_f64(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_serialize_cells() {
        let cells = vec![
            FieldValue::Missing,
            FieldValue::Number(100.0),
            FieldValue::Text("Lafite".into()),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[null,100.0,"Lafite"]"#);
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut table = sample_table();
        table.push_row(vec![FieldValue::from_text("Lafite")]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.cell(1, "Price").unwrap().is_missing());
    }

    #[test]
    fn test_push_row_rejects_long_rows() {
        let mut table = sample_table();
        let result = table.push_row(vec![FieldValue::Missing; 3]);
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn test_ensure_column() {
        let mut table = sample_table();
        assert_eq!(table.ensure_column("Price"), 1);
        let idx = table.ensure_column(columns::PRICE_TO_USE);
        assert_eq!(idx, 2);
        assert_eq!(table.headers().len(), 3);
        assert!(table.cell(0, columns::PRICE_TO_USE).unwrap().is_missing());
    }
}
