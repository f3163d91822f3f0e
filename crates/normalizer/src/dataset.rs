use crate::coerce::CoercionReport;
use crate::derive::DerivationReport;
use crate::resolution::ResolutionMap;
use crate::trade::{TradeRecord, UNKNOWN};
use chrono::NaiveDateTime;
use core_types::{CanonicalField, CellValue, RawRecordSet};
use serde::Serialize;

/// The output of the normalization pipeline: coerced records, the final
/// resolution map and what happened along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedDataset {
    pub(crate) records: RawRecordSet,
    pub(crate) resolution: ResolutionMap,
    pub(crate) collisions: Vec<String>,
    pub(crate) coercion: CoercionReport,
    pub(crate) derivations: Vec<DerivationReport>,
}

impl NormalizedDataset {
    pub fn records(&self) -> &RawRecordSet {
        &self.records
    }

    pub fn resolution(&self) -> &ResolutionMap {
        &self.resolution
    }

    /// Header names that occurred more than once after normalization.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn coercion(&self) -> &CoercionReport {
        &self.coercion
    }

    pub fn derivations(&self) -> &[DerivationReport] {
        &self.derivations
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn cells(&self, field: CanonicalField) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let column = self.resolution.column(field)?;
        self.records.column(column)
    }

    /// Values of a numeric field, `None` if the field is unresolved.
    pub fn numeric(&self, field: CanonicalField) -> Option<Vec<Option<f64>>> {
        Some(self.cells(field)?.map(CellValue::as_number).collect())
    }

    /// Parsed timestamps, `None` if `date` is unresolved.
    pub fn timestamps(&self) -> Option<Vec<Option<NaiveDateTime>>> {
        Some(self.cells(CanonicalField::Date)?.map(CellValue::as_timestamp).collect())
    }

    /// Text values of a field, `None` if the field is unresolved.
    pub fn text(&self, field: CanonicalField) -> Option<Vec<Option<String>>> {
        Some(
            self.cells(field)?
                .map(|c| c.as_text().map(|s| s.trim().to_string()))
                .collect(),
        )
    }

    /// Typed per-row view over every canonical field.
    pub fn trades(&self) -> Vec<TradeRecord> {
        let n = self.len();
        let numeric = |field| self.numeric(field).unwrap_or_else(|| vec![None; n]);
        let text = |field| self.text(field).unwrap_or_else(|| vec![None; n]);

        let dates = self.timestamps().unwrap_or_else(|| vec![None; n]);
        let markets = text(CanonicalField::Market);
        let directions = text(CanonicalField::Direction);
        let notes = text(CanonicalField::Notes);
        let entry = numeric(CanonicalField::Entry);
        let stop_loss = numeric(CanonicalField::StopLoss);
        let take_profit = numeric(CanonicalField::TakeProfit);
        let exit_price = numeric(CanonicalField::ExitPrice);
        let pnl = numeric(CanonicalField::Pnl);
        let risk_reward = numeric(CanonicalField::RiskReward);
        let quantity = numeric(CanonicalField::Quantity);

        (0..n)
            .map(|i| TradeRecord {
                row: i,
                date: dates[i],
                market: markets[i].clone().unwrap_or_else(|| UNKNOWN.to_string()),
                direction: directions[i].clone().unwrap_or_else(|| UNKNOWN.to_string()),
                entry: entry[i],
                stop_loss: stop_loss[i],
                take_profit: take_profit[i],
                exit_price: exit_price[i],
                pnl: pnl[i],
                risk_reward: risk_reward[i],
                quantity: quantity[i],
                notes: notes[i].clone().unwrap_or_default(),
            })
            .collect()
    }
}
