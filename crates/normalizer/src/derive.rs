use crate::error::NormalizeError;
use crate::resolution::ResolutionMap;
use core_types::{CanonicalField, CellValue, RawRecordSet};
use serde::Serialize;
use std::fmt;

pub const PNL_COLUMN: &str = "computed_pnl";
pub const RISK_REWARD_COLUMN: &str = "computed_rr";
pub const QUANTITY_COLUMN: &str = "_quantity_fallback";

/// Why a derived value could not be produced for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "field")]
pub enum DerivationFailure {
    /// An input field is null on this row.
    MissingInput(CanonicalField),
    /// The denominator (entry minus stop loss) is zero.
    DivisionByZero,
    /// The arithmetic overflowed to a non-finite value.
    NonFinite,
}

impl fmt::Display for DerivationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationFailure::MissingInput(field) => write!(f, "missing {}", field),
            DerivationFailure::DivisionByZero => f.write_str("division by zero"),
            DerivationFailure::NonFinite => f.write_str("non-finite result"),
        }
    }
}

/// Outcome of one derivation over the whole record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivationReport {
    pub field: CanonicalField,
    pub column: String,
    /// Rows that received a value.
    pub derived_rows: usize,
    /// `(row index, reason)` for every row left null.
    pub failures: Vec<(usize, DerivationFailure)>,
}

/// `(exit_price - entry) * quantity` for one row.
pub fn pnl_for_row(
    entry: Option<f64>,
    exit_price: Option<f64>,
    quantity: Option<f64>,
) -> Result<f64, DerivationFailure> {
    let entry = entry.ok_or(DerivationFailure::MissingInput(CanonicalField::Entry))?;
    let exit_price = exit_price.ok_or(DerivationFailure::MissingInput(CanonicalField::ExitPrice))?;
    let quantity = quantity.ok_or(DerivationFailure::MissingInput(CanonicalField::Quantity))?;
    let pnl = (exit_price - entry) * quantity;
    if pnl.is_finite() {
        Ok(pnl)
    } else {
        Err(DerivationFailure::NonFinite)
    }
}

/// `|take_profit - entry| / |entry - stop_loss|` for one row.
pub fn risk_reward_for_row(
    entry: Option<f64>,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
) -> Result<f64, DerivationFailure> {
    let entry = entry.ok_or(DerivationFailure::MissingInput(CanonicalField::Entry))?;
    let stop_loss = stop_loss.ok_or(DerivationFailure::MissingInput(CanonicalField::StopLoss))?;
    let take_profit =
        take_profit.ok_or(DerivationFailure::MissingInput(CanonicalField::TakeProfit))?;
    let risk = (entry - stop_loss).abs();
    if risk == 0.0 {
        return Err(DerivationFailure::DivisionByZero);
    }
    let rr = (take_profit - entry).abs() / risk;
    if rr.is_finite() {
        Ok(rr)
    } else {
        Err(DerivationFailure::NonFinite)
    }
}

fn numeric_column(
    records: &RawRecordSet,
    map: &ResolutionMap,
    field: CanonicalField,
) -> Option<Vec<Option<f64>>> {
    let column = map.column(field)?;
    Some(records.column(column)?.map(CellValue::as_number).collect())
}

/// Writes the per-row results as a derived column and binds it to `field`.
fn write_derived(
    records: &mut RawRecordSet,
    map: &mut ResolutionMap,
    field: CanonicalField,
    column: &str,
    results: Vec<Result<f64, DerivationFailure>>,
) -> Result<DerivationReport, NormalizeError> {
    let mut failures = Vec::new();
    let mut values = Vec::with_capacity(results.len());
    for (row, result) in results.into_iter().enumerate() {
        match result {
            Ok(v) => values.push(CellValue::Number(v)),
            Err(reason) => {
                failures.push((row, reason));
                values.push(CellValue::Empty);
            }
        }
    }
    let derived_rows = values.len() - failures.len();

    records.upsert_column(column, values)?;
    map.bind_derived(field, column);

    if !failures.is_empty() {
        tracing::warn!(
            field = %field,
            failed_rows = failures.len(),
            "Some rows could not be derived and were left null"
        );
    }
    tracing::debug!(field = %field, column, derived_rows, "Derived column");

    Ok(DerivationReport {
        field,
        column: column.to_string(),
        derived_rows,
        failures,
    })
}

/// Synthesizes PnL from entry, exit price and quantity when no PnL column
/// was resolved. Returns `None` when PnL is already bound or an input column
/// is unresolved.
pub fn derive_pnl(
    records: &mut RawRecordSet,
    map: &mut ResolutionMap,
) -> Result<Option<DerivationReport>, NormalizeError> {
    if map.contains(CanonicalField::Pnl) {
        return Ok(None);
    }
    let (Some(entry), Some(exit_price), Some(quantity)) = (
        numeric_column(records, map, CanonicalField::Entry),
        numeric_column(records, map, CanonicalField::ExitPrice),
        numeric_column(records, map, CanonicalField::Quantity),
    ) else {
        return Ok(None);
    };

    let results = entry
        .iter()
        .zip(&exit_price)
        .zip(&quantity)
        .map(|((e, x), q)| pnl_for_row(*e, *x, *q))
        .collect();

    write_derived(records, map, CanonicalField::Pnl, PNL_COLUMN, results).map(Some)
}

/// Synthesizes risk/reward from entry, stop loss and take profit when no
/// risk/reward column was resolved.
pub fn derive_risk_reward(
    records: &mut RawRecordSet,
    map: &mut ResolutionMap,
) -> Result<Option<DerivationReport>, NormalizeError> {
    if map.contains(CanonicalField::RiskReward) {
        return Ok(None);
    }
    let (Some(entry), Some(stop_loss), Some(take_profit)) = (
        numeric_column(records, map, CanonicalField::Entry),
        numeric_column(records, map, CanonicalField::StopLoss),
        numeric_column(records, map, CanonicalField::TakeProfit),
    ) else {
        return Ok(None);
    };

    let results = entry
        .iter()
        .zip(&stop_loss)
        .zip(&take_profit)
        .map(|((e, sl), tp)| risk_reward_for_row(*e, *sl, *tp))
        .collect();

    write_derived(
        records,
        map,
        CanonicalField::RiskReward,
        RISK_REWARD_COLUMN,
        results,
    )
    .map(Some)
}

/// Binds a constant quantity of `1` when no quantity column was resolved.
pub fn derive_quantity(
    records: &mut RawRecordSet,
    map: &mut ResolutionMap,
) -> Result<Option<DerivationReport>, NormalizeError> {
    if map.contains(CanonicalField::Quantity) {
        return Ok(None);
    }
    let results = vec![Ok(1.0); records.len()];
    write_derived(records, map, CanonicalField::Quantity, QUANTITY_COLUMN, results).map(Some)
}
