//! Dataset export for the wine dataset builder.
//!
//! This crate provides:
//! - Row-mapping serialization of a table (header order preserved)
//! - Compact JSON encoding
//! - Gzip-compressed dataset writing and reading

pub mod records;
pub mod writer;

pub use records::Records;
pub use writer::{encode_json, read_dataset, write_dataset, write_gzip, ExportSummary};
