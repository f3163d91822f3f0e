use core_types::CanonicalField;
use normalizer::{NormalizedDataset, TradeRecord};
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_TOP_N: usize = 5;

/// The top and bottom trades of a log by PnL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BestWorst {
    /// Highest PnL first.
    pub best: Vec<TradeRecord>,
    /// Lowest PnL first.
    pub worst: Vec<TradeRecord>,
}

impl BestWorst {
    pub fn is_empty(&self) -> bool {
        self.best.is_empty() && self.worst.is_empty()
    }
}

/// Orders two optional PnLs, always placing `None` after any value.
fn compare(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns up to `n` best and `n` worst trades by PnL.
///
/// Sorting is stable, so equal PnLs keep input order. Rows with an unparsed PnL
/// sort last in both lists. Both lists are empty when PnL is unresolved.
pub fn best_worst_trades(dataset: &NormalizedDataset, n: usize) -> BestWorst {
    if !dataset.resolution().contains(CanonicalField::Pnl) {
        return BestWorst::default();
    }
    let trades = dataset.trades();

    let mut best = trades.clone();
    best.sort_by(|a, b| compare(a.pnl, b.pnl, true));
    best.truncate(n);

    let mut worst = trades;
    worst.sort_by(|a, b| compare(a.pnl, b.pnl, false));
    worst.truncate(n);

    BestWorst { best, worst }
}
