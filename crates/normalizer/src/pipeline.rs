use crate::coerce::coerce_types;
use crate::dataset::NormalizedDataset;
use crate::derive::{derive_pnl, derive_quantity, derive_risk_reward};
use crate::error::NormalizeError;
use crate::headers::{duplicate_headers, normalize_headers};
use crate::resolution::resolve;
use core_types::RawRecordSet;

/// Runs the full normalization pipeline over a raw record set.
///
/// Steps, in order: normalize headers, resolve aliases, coerce types, derive
/// PnL, derive risk/reward, derive quantity. Running the pipeline again over
/// its own output yields the same resolution and the same values.
pub fn process(mut records: RawRecordSet) -> Result<NormalizedDataset, NormalizeError> {
    let headers = normalize_headers(records.columns());
    let collisions = duplicate_headers(&headers);
    for name in &collisions {
        tracing::warn!(
            column = %name,
            "Several columns normalize to the same name; the last one is used"
        );
    }
    records.rename_columns(headers)?;

    let mut resolution = resolve(records.columns());
    let coercion = coerce_types(&mut records, &resolution)?;

    let mut derivations = Vec::new();
    if let Some(report) = derive_pnl(&mut records, &mut resolution)? {
        derivations.push(report);
    }
    if let Some(report) = derive_risk_reward(&mut records, &mut resolution)? {
        derivations.push(report);
    }
    if let Some(report) = derive_quantity(&mut records, &mut resolution)? {
        derivations.push(report);
    }

    tracing::info!(
        rows = records.len(),
        resolved = resolution.len(),
        derived = derivations.len(),
        "Normalized trade records"
    );

    Ok(NormalizedDataset {
        records,
        resolution,
        collisions,
        coercion,
        derivations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{PNL_COLUMN, QUANTITY_COLUMN};
    use core_types::{CanonicalField, CellValue};

    fn raw(columns: &[&str], rows: Vec<Vec<&str>>) -> RawRecordSet {
        RawRecordSet::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::from).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn messy_headers_resolve_and_derive() {
        let data = process(raw(
            &["Trade Date", "Symbol", "Entry Price", "Exit", "Qty", "Stop Loss", "TP"],
            vec![vec!["2024-02-01", "ES", "100", "110", "2", "95", "120"]],
        ))
        .unwrap();

        let trades = data.trades();
        assert_eq!(trades.len(), 1);
        let t = &trades[0];
        assert_eq!(t.market, "ES");
        assert_eq!(t.direction, "Unknown");
        assert_eq!(t.pnl, Some(20.0));
        assert_eq!(t.risk_reward, Some(4.0));
        assert_eq!(t.quantity, Some(2.0));
        assert!(t.date.is_some());
        assert_eq!(data.resolution().column(CanonicalField::Pnl), Some(PNL_COLUMN));
        assert_eq!(data.derivations().len(), 2);
    }

    #[test]
    fn quantity_fallback_enables_nothing_but_itself() {
        let data = process(raw(&["entry", "exit_price"], vec![vec!["100", "110"]])).unwrap();
        assert_eq!(
            data.resolution().column(CanonicalField::Quantity),
            Some(QUANTITY_COLUMN)
        );
        // PnL derivation runs before the quantity fallback.
        assert!(!data.resolution().contains(CanonicalField::Pnl));
    }

    #[test]
    fn reprocessing_is_stable() {
        let first = process(raw(
            &["Entry", "Exit Price", "Quantity", "Notes"],
            vec![vec!["10", "12", "3", "scalp"], vec!["12", "9", "1", ""]],
        ))
        .unwrap();
        let second = process(first.records().clone()).unwrap();

        assert_eq!(first.resolution(), second.resolution());
        assert_eq!(first.records().columns(), second.records().columns());
        assert_eq!(first.trades(), second.trades());
    }

    #[test]
    fn header_collision_uses_last_column() {
        let data = process(raw(&["PnL", "pnl "], vec![vec!["1", "2"]])).unwrap();
        assert_eq!(data.collisions(), &["pnl".to_string()]);
        assert_eq!(data.trades()[0].pnl, Some(2.0));
    }
}
