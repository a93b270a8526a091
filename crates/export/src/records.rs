//! Row-mapping view of a table.
//!
//! Serializes a [`Table`] as a JSON array of objects, one per row, with keys
//! in header order. Missing cells are written as `null` and keep their key.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use winedata_core::{FieldValue, Table};

/// Borrowed, serializable sequence of row mappings.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    table: &'a Table,
}

impl<'a> Records<'a> {
    /// Wrap a table for serialization.
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

struct RowMap<'a> {
    headers: &'a [String],
    values: &'a [FieldValue],
}

impl Serialize for RowMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (key, value) in self.headers.iter().zip(self.values) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let headers = self.table.headers();
        let mut seq = serializer.serialize_seq(Some(self.table.len()))?;
        for values in self.table.rows() {
            seq.serialize_element(&RowMap { headers, values })?;
        }
        seq.end()
    }
}
