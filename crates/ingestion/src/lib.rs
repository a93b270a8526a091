//! Data ingestion and normalization for the wine dataset builder.
//!
//! This crate handles:
//! - CSV loading into an ordered table
//! - Numeric coercion of the price/score columns
//! - Trade date parsing
//! - Typed row extraction for the pricing stage

pub mod dates;
pub mod loader;
pub mod normalize;
pub mod row;

pub use dates::parse_trade_date;
pub use loader::{load_csv, read_csv};
pub use normalize::{normalize_types, parse_numeric, NormalizationStats};
pub use row::ColumnMap;
