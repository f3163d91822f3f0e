//! # TradeTrack Analytics Engine
//!
//! This crate turns a normalized trade log into trading-performance metrics.
//! It acts as the "unbiased judge" of the system.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of where the trades came from.
//!   It depends only on `core-types` and `normalizer`.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   a `NormalizedDataset` as input and produces a `MetricsSnapshot` as output. The
//!   snapshot is recomputed in full on every call.
//! - **Fixed Null Policy:** A null PnL counts as a zero-PnL trade everywhere.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `MetricsSnapshot`: All aggregate metrics plus the PnL, equity and drawdown series.
//! - `best_worst_trades`: Top and bottom trades by PnL.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod ranking;
pub mod report;
pub mod stats;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use ranking::{best_worst_trades, BestWorst, DEFAULT_TOP_N};
pub use report::MetricsSnapshot;
