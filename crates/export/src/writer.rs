//! Compressed dataset writer.
//!
//! The output is a single minified JSON array wrapped in standard gzip
//! framing. The gzip stream is finished and the file flushed before
//! [`write_dataset`] returns.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};
use winedata_core::{Result, Table};

use crate::records::Records;

/// Result of writing a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File written.
    pub path: PathBuf,
    /// Number of row records in the JSON array.
    pub rows: usize,
    /// Size of the compressed file in bytes.
    pub compressed_bytes: u64,
}

/// Encode `table` as compact JSON without compression.
pub fn encode_json(table: &Table) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&Records::new(table))?)
}

/// Write `table` as gzip-compressed compact JSON into `sink`.
///
/// Returns the sink once the gzip trailer has been written.
pub fn write_gzip<W: Write>(table: &Table, sink: W) -> Result<W> {
    let mut encoder = GzEncoder::new(sink, Compression::default());
    serde_json::to_writer(&mut encoder, &Records::new(table))?;
    Ok(encoder.finish()?)
}

/// Write `table` to `path`, replacing any existing file.
pub fn write_dataset(table: &Table, path: impl AsRef<Path>) -> Result<ExportSummary> {
    let path = path.as_ref();
    let file = File::create(path)?;

    let mut writer = write_gzip(table, BufWriter::new(file))?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    let compressed_bytes = file.metadata()?.len();
    drop(file);

    let summary = ExportSummary {
        path: path.to_path_buf(),
        rows: table.len(),
        compressed_bytes,
    };
    info!(
        path = %summary.path.display(),
        rows = summary.rows,
        bytes = summary.compressed_bytes,
        "wrote dataset"
    );
    Ok(summary)
}

/// Decompress and parse a dataset file.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let decoder = GzDecoder::new(BufReader::new(File::open(path)?));
    let records: Vec<serde_json::Value> = serde_json::from_reader(decoder)?;
    debug!(path = %path.display(), rows = records.len(), "read dataset");
    Ok(records)
}
