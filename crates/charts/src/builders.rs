use crate::figure::{Bar, ChartData, ChartFigure, ChartKind, HistogramBin, ScatterPoint, SeriesColor};
use analytics::MetricsSnapshot;
use chrono::Datelike;
use core_types::CanonicalField;
use normalizer::NormalizedDataset;
use std::collections::BTreeMap;

/// Cumulative PnL by trade number. Absent for an empty log.
pub fn equity_curve(snapshot: &MetricsSnapshot) -> Option<ChartFigure> {
    if snapshot.equity.is_empty() {
        return None;
    }
    let points = snapshot
        .equity
        .iter()
        .enumerate()
        .map(|(i, e)| ((i + 1) as f64, *e))
        .collect();
    Some(ChartFigure::new(
        ChartKind::EquityCurve,
        "Equity Curve (Cumulative PnL)",
        "Trade #",
        "Cumulative PnL",
        ChartData::Line {
            points,
            color: SeriesColor::Blue,
        },
    ))
}

/// Win and loss counts, in that order. Absent for an empty log.
pub fn win_loss(snapshot: &MetricsSnapshot) -> Option<ChartFigure> {
    if snapshot.total_trades == 0 {
        return None;
    }
    let bars = vec![
        Bar {
            label: "Win".to_string(),
            value: snapshot.wins as f64,
            color: SeriesColor::Green,
        },
        Bar {
            label: "Loss".to_string(),
            value: snapshot.losses as f64,
            color: SeriesColor::Red,
        },
    ];
    Some(ChartFigure::new(
        ChartKind::WinLoss,
        "Win vs Loss Counts",
        "",
        "Number of Trades",
        ChartData::Bars { bars },
    ))
}

/// Equal-width buckets spanning the min..max of `values`.
fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Histogram of per-trade PnL. Absent for an empty log.
pub fn pnl_distribution(snapshot: &MetricsSnapshot, bins: usize) -> Option<ChartFigure> {
    let bins = histogram(&snapshot.pnl_series, bins);
    if bins.is_empty() {
        return None;
    }
    Some(ChartFigure::new(
        ChartKind::PnlDistribution,
        "PnL Distribution (per trade)",
        "PnL",
        "Frequency",
        ChartData::Histogram {
            bins,
            color: SeriesColor::Purple,
        },
    ))
}

/// Trade count per market, most traded first. Absent when `market` is
/// unresolved or holds no values.
pub fn market_breakdown(dataset: &NormalizedDataset) -> Option<ChartFigure> {
    let markets = dataset.text(CanonicalField::Market)?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for market in markets.into_iter().flatten() {
        match counts.iter_mut().find(|(m, _)| *m == market) {
            Some((_, n)) => *n += 1,
            None => counts.push((market, 1)),
        }
    }
    if counts.is_empty() {
        return None;
    }
    // Stable: equal counts keep first-appearance order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let bars = counts
        .into_iter()
        .map(|(label, n)| Bar {
            label,
            value: n as f64,
            color: SeriesColor::Orange,
        })
        .collect();
    Some(ChartFigure::new(
        ChartKind::MarketBreakdown,
        "Trades by Market",
        "Market",
        "Count",
        ChartData::Bars { bars },
    ))
}

/// Risk/reward against PnL for every row with a risk/reward value. Absent when
/// risk/reward is unresolved or entirely null.
pub fn rr_vs_pnl(dataset: &NormalizedDataset, snapshot: &MetricsSnapshot) -> Option<ChartFigure> {
    let rr = dataset.numeric(CanonicalField::RiskReward)?;
    let points: Vec<ScatterPoint> = rr
        .iter()
        .zip(&snapshot.pnl_series)
        .filter_map(|(rr, pnl)| {
            rr.map(|x| ScatterPoint {
                x,
                y: *pnl,
                win: *pnl > 0.0,
            })
        })
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(ChartFigure::new(
        ChartKind::RiskRewardScatter,
        "Risk:Reward vs PnL",
        "Risk:Reward",
        "PnL",
        ChartData::Scatter { points },
    ))
}

/// Total PnL per calendar month from the first to the last dated trade, with
/// empty months shown as zero. Absent when `date` is unresolved or no date parsed.
pub fn monthly_pnl(dataset: &NormalizedDataset, snapshot: &MetricsSnapshot) -> Option<ChartFigure> {
    let dates = dataset.timestamps()?;

    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, pnl) in dates.iter().zip(&snapshot.pnl_series) {
        if let Some(date) = date {
            *totals.entry((date.year(), date.month())).or_default() += pnl;
        }
    }
    let (&first, _) = totals.first_key_value()?;
    let (&last, _) = totals.last_key_value()?;

    let mut bars = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        let value = totals.get(&(year, month)).copied().unwrap_or(0.0);
        bars.push(Bar {
            label: format!("{:04}-{:02}", year, month),
            value,
            color: if value >= 0.0 { SeriesColor::Blue } else { SeriesColor::Red },
        });
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    Some(ChartFigure::new(
        ChartKind::MonthlyPnl,
        "Monthly PnL",
        "Month",
        "PnL",
        ChartData::Bars { bars },
    ))
}

/// Every chart that can be drawn for this dataset, in report order.
pub fn standard_figures(
    dataset: &NormalizedDataset,
    snapshot: &MetricsSnapshot,
    histogram_bins: usize,
) -> Vec<ChartFigure> {
    let figures: Vec<ChartFigure> = [
        equity_curve(snapshot),
        win_loss(snapshot),
        pnl_distribution(snapshot, histogram_bins),
        market_breakdown(dataset),
        rr_vs_pnl(dataset, snapshot),
        monthly_pnl(dataset, snapshot),
    ]
    .into_iter()
    .flatten()
    .collect();
    tracing::debug!(count = figures.len(), "Built chart figures");
    figures
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::{CellValue, RawRecordSet};

    fn analyzed(columns: &[&str], rows: Vec<Vec<&str>>) -> (NormalizedDataset, MetricsSnapshot) {
        let raw = RawRecordSet::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::from).collect())
                .collect(),
        )
        .unwrap();
        let data = normalizer::process(raw).unwrap();
        let snapshot = AnalyticsEngine::new().calculate(&data).unwrap();
        (data, snapshot)
    }

    // ── Always-available charts ──

    #[test]
    fn equity_points_are_numbered_from_one() {
        let (_, snap) = analyzed(&["pnl"], vec![vec!["1"], vec!["2"]]);
        let fig = equity_curve(&snap).unwrap();
        assert_eq!(
            fig.data,
            ChartData::Line {
                points: vec![(1.0, 1.0), (2.0, 3.0)],
                color: SeriesColor::Blue
            }
        );
    }

    #[test]
    fn win_loss_is_zero_filled() {
        let (_, snap) = analyzed(&["pnl"], vec![vec!["3"], vec!["4"]]);
        let fig = win_loss(&snap).unwrap();
        let values: Vec<f64> = fig.bars().unwrap().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![2.0, 0.0]);
    }

    #[test]
    fn histogram_counts_every_trade() {
        let (_, snap) = analyzed(&["pnl"], vec![vec!["-10"], vec!["0"], vec!["10"], vec!["10"]]);
        let fig = pnl_distribution(&snap, 30).unwrap();
        let ChartData::Histogram { bins, .. } = fig.data else {
            panic!("expected a histogram");
        };
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[29].count, 2);
        assert_eq!(bins[0].count, 1);
    }

    #[test]
    fn constant_series_lands_in_one_bin() {
        let bins = histogram(&[5.0, 5.0, 5.0], 30);
        assert_eq!(bins.iter().filter(|b| b.count > 0).count(), 1);
        assert!(
            bins.iter()
                .any(|b| b.count == 3 && b.lower <= 5.0 + 1e-9 && 5.0 <= b.upper + 1e-9)
        );
    }

    #[test]
    fn empty_log_has_no_figures() {
        let (data, snap) = analyzed(&["pnl"], vec![]);
        assert!(standard_figures(&data, &snap, 30).is_empty());
    }

    // ── Optional charts ──

    #[test]
    fn market_counts_sorted_descending_without_nulls() {
        let (data, _) = analyzed(
            &["pnl", "symbol"],
            vec![vec!["1", "NQ"], vec!["1", "ES"], vec!["1", ""], vec!["1", "ES"]],
        );
        let fig = market_breakdown(&data).unwrap();
        let labels: Vec<&str> = fig.bars().unwrap().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["ES", "NQ"]);
    }

    #[test]
    fn optional_charts_absent_without_columns() {
        let (data, snap) = analyzed(&["pnl"], vec![vec!["1"]]);
        assert!(market_breakdown(&data).is_none());
        assert!(rr_vs_pnl(&data, &snap).is_none());
        assert!(monthly_pnl(&data, &snap).is_none());
        assert_eq!(standard_figures(&data, &snap, 30).len(), 3);
    }

    #[test]
    fn scatter_skips_null_rr_and_flags_outcome() {
        let (data, snap) = analyzed(
            &["pnl", "rr"],
            vec![vec!["5", "2"], vec!["-1", ""], vec!["-2", "1.5"]],
        );
        let fig = rr_vs_pnl(&data, &snap).unwrap();
        assert_eq!(
            fig.data,
            ChartData::Scatter {
                points: vec![
                    ScatterPoint { x: 2.0, y: 5.0, win: true },
                    ScatterPoint { x: 1.5, y: -2.0, win: false },
                ]
            }
        );
    }

    #[test]
    fn monthly_totals_fill_gaps() {
        let (data, snap) = analyzed(
            &["date", "pnl"],
            vec![
                vec!["2023-11-03", "10"],
                vec!["2023-11-20", "-4"],
                vec!["bad date", "100"],
                vec!["2024-01-15", "7"],
            ],
        );
        let fig = monthly_pnl(&data, &snap).unwrap();
        let bars: Vec<(&str, f64)> = fig
            .bars()
            .unwrap()
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(bars, vec![("2023-11", 6.0), ("2023-12", 0.0), ("2024-01", 7.0)]);
    }

    #[test]
    fn monthly_absent_when_no_date_parses() {
        let (data, snap) = analyzed(&["date", "pnl"], vec![vec!["soon", "1"]]);
        assert!(monthly_pnl(&data, &snap).is_none());
    }
}
