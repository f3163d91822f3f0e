//! # TradeTrack Reporter
//!
//! Presents a `MetricsSnapshot` as a KPI summary and as a downloadable PDF with
//! the standard charts.
//!
//! ## Public API
//!
//! - `kpi_lines`: The labelled KPI rows shared by the PDF and the console.
//! - `PdfReport`: Assembles the PDF bytes from a snapshot and rendered charts.
//! - `generate_report`: Figures, temporary images, PDF and cleanup in one call.
//! - `ReportError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod kpi;
pub mod pdf;

pub use error::ReportError;
pub use kpi::{kpi_lines, KpiLine};
pub use pdf::{generate_report, PdfReport, ReportOptions};
