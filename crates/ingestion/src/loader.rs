//! CSV loading.
//!
//! Reads a headered CSV export into a [`Table`] of text cells. Empty cells
//! become `Missing`; no type coercion happens here.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};
use winedata_core::{Error, FieldValue, Result, Table};

/// Load a CSV file from disk.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_csv(file)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "loaded raw export"
    );
    Ok(table)
}

/// Read a headered CSV from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(Error::data("input has no header row"));
    }
    let headers = dedupe_headers(headers);
    debug!(?headers, "parsed header row");

    let mut table = Table::new(headers);
    for record in csv_reader.records() {
        let record = record?;
        let values = record.iter().map(FieldValue::from_text).collect();
        table.push_row(values)?;
    }

    Ok(table)
}

/// Rename repeated headers to `name.1`, `name.2`, ... so every output key is
/// unique. The first occurrence keeps its name.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let name = if seen.contains(&header) {
            let count = counts.entry(header.clone()).or_insert(0);
            let renamed = loop {
                *count += 1;
                let candidate = format!("{}.{}", header, count);
                if !seen.contains(&candidate) {
                    break candidate;
                }
            };
            debug!(%header, %renamed, "renamed duplicate header");
            renamed
        } else {
            header
        };
        seen.insert(name.clone());
        out.push(name);
    }
    out
}
