use crate::encoding::decode_text;
use crate::error::IngestError;
use core_types::{CellValue, RawRecordSet};
use csv::ReaderBuilder;
use std::path::Path;

/// Reads a CSV trade log from disk.
pub fn load_csv_path(path: &Path) -> Result<RawRecordSet, IngestError> {
    let bytes = std::fs::read(path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Loading trade log");
    load_csv_bytes(&bytes)
}

/// Decodes and parses CSV bytes into a record set.
///
/// The first row is the header. Rows shorter than the header are padded with
/// empty cells and cells beyond the header width are dropped.
pub fn load_csv_bytes(bytes: &[u8]) -> Result<RawRecordSet, IngestError> {
    let decoded = decode_text(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(decoded.text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() || columns.iter().all(|c| c.trim().is_empty()) {
        return Err(IngestError::NoColumns);
    }

    let width = columns.len();
    let mut records = RawRecordSet::new(columns);
    let mut ragged = 0usize;
    for result in reader.records() {
        let record = result?;
        if record.len() != width {
            ragged += 1;
        }
        let row = (0..width)
            .map(|i| record.get(i).map_or(CellValue::Empty, CellValue::from_text))
            .collect();
        records.push_row(row)?;
    }

    if ragged > 0 {
        tracing::warn!(ragged, width, "Some rows did not match the header width");
    }
    tracing::debug!(
        rows = records.len(),
        columns = width,
        encoding = decoded.encoding,
        "Parsed CSV trade log"
    );
    Ok(records)
}
