use crate::error::AnalyticsError;
use crate::report::MetricsSnapshot;
use crate::stats::{cumulative_sum, drawdown_series, floored, longest_streak, mean, population_std_dev};
use core_types::CanonicalField;
use normalizer::NormalizedDataset;

/// A stateless calculator for deriving performance metrics from a trade log.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The normalized trade log, including its resolution map.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MetricsSnapshot`, or
    /// `AnalyticsError::MissingRequiredField` when PnL was neither present nor
    /// derivable. An empty log with a resolvable PnL yields a zeroed snapshot.
    pub fn calculate(&self, dataset: &NormalizedDataset) -> Result<MetricsSnapshot, AnalyticsError> {
        let pnl = dataset
            .numeric(CanonicalField::Pnl)
            .ok_or(AnalyticsError::MissingRequiredField(CanonicalField::Pnl))?;
        let pnl: Vec<f64> = pnl.into_iter().map(|p| p.unwrap_or(0.0)).collect();

        let mut report = MetricsSnapshot::new();

        self.calculate_counts(&pnl, &mut report);
        self.calculate_averages(&pnl, &mut report);
        self.calculate_ratios(&pnl, &mut report);
        self.calculate_drawdown(&pnl, &mut report);
        self.calculate_streaks(&pnl, &mut report);
        self.calculate_risk_reward(dataset, &mut report);
        report.pnl_series = pnl;

        tracing::debug!(
            total_trades = report.total_trades,
            win_rate = report.win_rate,
            max_drawdown = report.max_drawdown,
            "Calculated performance metrics"
        );
        Ok(report)
    }

    /// Trade, win and loss counts plus the win rate. A zero PnL is a loss.
    fn calculate_counts(&self, pnl: &[f64], report: &mut MetricsSnapshot) {
        report.total_trades = pnl.len();
        report.wins = pnl.iter().filter(|p| **p > 0.0).count();
        report.losses = report.total_trades - report.wins;

        if report.total_trades > 0 {
            report.win_rate = report.wins as f64 / report.total_trades as f64 * 100.0;
        }
    }

    /// Average win, average loss (as a magnitude), gross figures and expectancy.
    fn calculate_averages(&self, pnl: &[f64], report: &mut MetricsSnapshot) {
        let winners: Vec<f64> = pnl.iter().copied().filter(|p| *p > 0.0).collect();
        let losers: Vec<f64> = pnl.iter().copied().filter(|p| *p <= 0.0).collect();

        report.avg_win = mean(&winners);
        report.avg_loss = mean(&losers).abs();
        report.gross_profit = winners.iter().sum();
        report.gross_loss = losers.iter().sum::<f64>().abs();

        let win_fraction = report.win_rate / 100.0;
        let loss_fraction = (100.0 - report.win_rate) / 100.0;
        report.expectancy = win_fraction * report.avg_win - loss_fraction * report.avg_loss;
    }

    /// Profit factor and the per-trade Sharpe-like ratio.
    fn calculate_ratios(&self, pnl: &[f64], report: &mut MetricsSnapshot) {
        report.profit_factor = report.gross_profit / floored(report.gross_loss);
        report.sharpe = mean(pnl) / floored(population_std_dev(pnl));
    }

    fn calculate_drawdown(&self, pnl: &[f64], report: &mut MetricsSnapshot) {
        report.equity = cumulative_sum(pnl);
        report.drawdown = drawdown_series(&report.equity);
        report.max_drawdown = report.drawdown.iter().copied().fold(0.0, f64::min);
    }

    fn calculate_streaks(&self, pnl: &[f64], report: &mut MetricsSnapshot) {
        report.longest_win_streak = longest_streak(pnl.iter().map(|p| *p > 0.0));
        report.longest_loss_streak = longest_streak(pnl.iter().map(|p| *p <= 0.0));
    }

    /// Mean of the non-null risk/reward values, if any.
    fn calculate_risk_reward(&self, dataset: &NormalizedDataset, report: &mut MetricsSnapshot) {
        let Some(values) = dataset.numeric(CanonicalField::RiskReward) else {
            return;
        };
        let present: Vec<f64> = values.into_iter().flatten().collect();
        if !present.is_empty() {
            report.avg_rr = Some(mean(&present));
        }
    }
}
