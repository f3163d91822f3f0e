use serde::{Deserialize, Serialize};

/// A complete, read-only snapshot of trading performance.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// chart builders, the PDF report and the console tables consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // I. Trade Counts
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,

    // II. Averages and Expectancy
    pub avg_win: f64,
    pub avg_loss: f64,
    pub expectancy: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,

    // III. Ratios
    pub profit_factor: f64,
    pub sharpe: f64,
    pub avg_rr: Option<f64>, // None when risk/reward is unresolved or entirely null

    // IV. Risk and Streaks
    pub max_drawdown: f64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,

    // V. Series
    pub pnl_series: Vec<f64>,
    pub equity: Vec<f64>,
    pub drawdown: Vec<f64>,
}

impl MetricsSnapshot {
    /// Creates a new, zeroed-out snapshot.
    /// This is the result for an empty trade log.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            avg_win: 0.0,
            avg_loss: 0.0,
            expectancy: 0.0,
            gross_profit: 0.0,
            gross_loss: 0.0,
            profit_factor: 0.0,
            sharpe: 0.0,
            avg_rr: None,
            max_drawdown: 0.0,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            pnl_series: Vec::new(),
            equity: Vec::new(),
            drawdown: Vec::new(),
        }
    }

    /// Net PnL, equal to the last equity value.
    pub fn total_pnl(&self) -> f64 {
        self.equity.last().copied().unwrap_or(0.0)
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
