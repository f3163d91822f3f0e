use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed canonical schema every trade log is mapped onto.
///
/// Declaration order is the order fields are resolved and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Date,
    Market,
    Direction,
    Entry,
    StopLoss,
    TakeProfit,
    ExitPrice,
    Pnl,
    RiskReward,
    Quantity,
    Notes,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::Date,
        CanonicalField::Market,
        CanonicalField::Direction,
        CanonicalField::Entry,
        CanonicalField::StopLoss,
        CanonicalField::TakeProfit,
        CanonicalField::ExitPrice,
        CanonicalField::Pnl,
        CanonicalField::RiskReward,
        CanonicalField::Quantity,
        CanonicalField::Notes,
    ];

    /// Fields coerced to floating point during normalization.
    pub const NUMERIC: [CanonicalField; 7] = [
        CanonicalField::Entry,
        CanonicalField::StopLoss,
        CanonicalField::TakeProfit,
        CanonicalField::ExitPrice,
        CanonicalField::Pnl,
        CanonicalField::RiskReward,
        CanonicalField::Quantity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Date => "date",
            CanonicalField::Market => "market",
            CanonicalField::Direction => "direction",
            CanonicalField::Entry => "entry",
            CanonicalField::StopLoss => "stop_loss",
            CanonicalField::TakeProfit => "take_profit",
            CanonicalField::ExitPrice => "exit_price",
            CanonicalField::Pnl => "pnl",
            CanonicalField::RiskReward => "risk_reward",
            CanonicalField::Quantity => "quantity",
            CanonicalField::Notes => "notes",
        }
    }

    /// Accepted column names in priority order, already in normalized header form.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Date => &["date", "trade_date", "timestamp", "time"],
            CanonicalField::Market => &["market", "market_type", "symbol", "instrument"],
            CanonicalField::Direction => &["direction", "side", "buy/sell"],
            CanonicalField::Entry => &["entry", "entry_price", "entryprice"],
            CanonicalField::StopLoss => {
                &["stop_loss", "stoploss", "sl", "stop_loss_price", "stop"]
            }
            CanonicalField::TakeProfit => {
                &["take_profit", "takeprofit", "tp", "target", "take_profit_price"]
            }
            CanonicalField::ExitPrice => &["exit_price", "exitprice", "exit"],
            CanonicalField::Pnl => &["pnl", "profit", "pl", "profit_loss", "profit/loss"],
            CanonicalField::RiskReward => {
                &["risk_reward", "rr", "riskreward", "risk:reward", "risk_reward_ratio"]
            }
            CanonicalField::Quantity => &["quantity", "qty", "size"],
            CanonicalField::Notes => &["notes", "note", "comment"],
        }
    }

    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
