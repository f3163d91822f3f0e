//! # TradeTrack Charts
//!
//! Builds the standard set of performance charts and rasterizes them for the
//! PDF report.
//!
//! ## Architectural Principles
//!
//! - **Figures are data:** Every builder is a pure function of the dataset and
//!   the metrics snapshot, returning a `ChartFigure` or `None` when the columns it
//!   needs are missing. Rendering is a separate step.
//! - **Scoped artifacts:** Rendered PNGs live in temporary files owned by
//!   `ChartArtifacts` and are removed on `cleanup()` or drop.
//!
//! ## Public API
//!
//! - `equity_curve`, `win_loss`, `pnl_distribution`, `market_breakdown`,
//!   `rr_vs_pnl`, `monthly_pnl`, `standard_figures`: The figure builders.
//! - `render_png`: Draw one figure to a PNG file.
//! - `ChartArtifacts`: Temporary PNGs for a report.

pub mod artifacts;
pub mod builders;
pub mod error;
pub mod figure;
pub mod render;

pub use artifacts::{ChartArtifact, ChartArtifacts};
pub use builders::{
    equity_curve, market_breakdown, monthly_pnl, pnl_distribution, rr_vs_pnl, standard_figures,
    win_loss,
};
pub use error::ChartError;
pub use figure::{Bar, ChartData, ChartFigure, ChartKind, HistogramBin, ScatterPoint, SeriesColor};
pub use render::render_png;
