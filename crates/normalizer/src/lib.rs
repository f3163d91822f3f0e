//! # TradeTrack Normalizer
//!
//! Turns a trade log with arbitrary column names into the canonical schema.
//!
//! ## Architectural Principles
//!
//! - **Pure Pipeline:** Every step takes the record set and resolution map by
//!   value or reference and returns the result. Nothing is cached between calls.
//! - **Local Recovery:** Unparseable cells become null and underivable rows get
//!   a null derived value. Only a missing PnL is ever fatal, and that decision
//!   belongs to the analytics crate.
//!
//! ## Public API
//!
//! - `process`: Runs header normalization, resolution, coercion and the three
//!   derivations in order, producing a `NormalizedDataset`.
//! - `normalize_headers`, `resolve`, `coerce_types`, `derive_pnl`,
//!   `derive_risk_reward`, `derive_quantity`: The individual pipeline steps.
//! - `ResolutionMap`: Canonical field to column binding.
//! - `TradeRecord`: A typed view of one normalized row.

pub mod coerce;
pub mod dataset;
pub mod derive;
pub mod error;
pub mod headers;
pub mod pipeline;
pub mod resolution;
pub mod trade;

pub use coerce::{coerce_types, parse_number, parse_timestamp, CoercionReport};
pub use dataset::NormalizedDataset;
pub use derive::{
    derive_pnl, derive_quantity, derive_risk_reward, DerivationFailure, DerivationReport,
    PNL_COLUMN, QUANTITY_COLUMN, RISK_REWARD_COLUMN,
};
pub use error::NormalizeError;
pub use headers::{normalize_header, normalize_headers};
pub use pipeline::process;
pub use resolution::{resolve, ColumnSource, ResolutionMap};
pub use trade::TradeRecord;
