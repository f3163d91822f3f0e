//! # TradeTrack Core Types
//!
//! The shared vocabulary of the workspace: the loosely-typed cells read from a
//! trade log, the raw record set that holds them, and the fixed set of
//! canonical trade fields the rest of the system resolves columns against.
//!
//! ## Public API
//!
//! - `CellValue`: A single scalar read from an input row.
//! - `RawRecordSet`: An ordered, schema-less table of cells.
//! - `CanonicalField`: The enumerated canonical schema with its alias table.
//! - `CoreError`: The specific error types that can be returned from this crate.

pub mod cell;
pub mod error;
pub mod field;
pub mod records;

pub use cell::CellValue;
pub use error::CoreError;
pub use field::CanonicalField;
pub use records::RawRecordSet;
