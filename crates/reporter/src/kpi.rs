use analytics::MetricsSnapshot;

/// One labelled KPI row of the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiLine {
    pub label: &'static str,
    pub value: String,
}

impl KpiLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// The KPI summary rows, headline figures first.
pub fn kpi_lines(snapshot: &MetricsSnapshot) -> Vec<KpiLine> {
    let mut lines = vec![
        KpiLine::new("Total Trades", snapshot.total_trades.to_string()),
        KpiLine::new("Win Rate", format!("{:.2}%", snapshot.win_rate)),
        KpiLine::new("Total PnL", format!("{:.2}", snapshot.total_pnl())),
        KpiLine::new("Expectancy", format!("{:.2}", snapshot.expectancy)),
        KpiLine::new("Profit Factor", format!("{:.2}", snapshot.profit_factor)),
        KpiLine::new("Sharpe (mean/std)", format!("{:.2}", snapshot.sharpe)),
        KpiLine::new("Max Drawdown", format!("{:.2}", snapshot.max_drawdown)),
        KpiLine::new("Avg Win", format!("{:.2}", snapshot.avg_win)),
        KpiLine::new("Avg Loss", format!("{:.2}", snapshot.avg_loss)),
        KpiLine::new("Longest Win Streak", snapshot.longest_win_streak.to_string()),
        KpiLine::new("Longest Loss Streak", snapshot.longest_loss_streak.to_string()),
    ];
    if let Some(rr) = snapshot.avg_rr {
        lines.push(KpiLine::new("Avg R:R", format!("{:.2}", rr)));
    }
    lines
}
