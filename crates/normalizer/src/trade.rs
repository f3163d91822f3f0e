use chrono::NaiveDateTime;
use serde::Serialize;

pub const UNKNOWN: &str = "Unknown";

/// One normalized row seen through the canonical schema.
///
/// Numeric fields are `None` when unresolved or unparseable. `market` and
/// `direction` fall back to `"Unknown"`, `notes` to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Position of the row in the input.
    pub row: usize,
    pub date: Option<NaiveDateTime>,
    pub market: String,
    pub direction: String,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
    pub risk_reward: Option<f64>,
    pub quantity: Option<f64>,
    pub notes: String,
}
