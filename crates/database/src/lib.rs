//! # TradeTrack Database Crate
//!
//! A small, application-specific interface to the SQLite trade-history file.
//! It is the system's "permanent archive" of analyzed trades.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic and SQL.
//!   The analysis path never depends on it.
//! - **Append-only:** Trades are only ever inserted in batches and read back in full.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a `SqlitePool`.
//!
//! ## Public API
//!
//! - `connect`: The async function to open (and create if needed) the database pool.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `TradeStore`: Batch insert and full read-back of stored trades.
//! - `DbError`: The specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
pub mod repository;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{StoredTrade, TradeStore, STORED_COLUMNS};
