//! # TradeTrack Ingest
//!
//! Everything that turns user input into a `RawRecordSet`: CSV files in any
//! common encoding, and manually entered grids.
//!
//! ## Public API
//!
//! - `load_csv_path` / `load_csv_bytes`: Decode and parse a CSV trade log.
//! - `decode_text`: The encoding detection step on its own.
//! - `from_grid`: Build a record set from a manual-entry grid, dropping blank rows.
//! - `IngestError`: The specific error types that can be returned from this crate.

pub mod csv_source;
pub mod encoding;
pub mod error;
pub mod grid;

pub use csv_source::{load_csv_bytes, load_csv_path};
pub use encoding::{decode_text, DecodedText};
pub use error::IngestError;
pub use grid::{from_grid, MANUAL_ENTRY_COLUMNS};
