use crate::error::IngestError;
use core_types::{CellValue, RawRecordSet};

/// Columns offered by the manual-entry grid.
pub const MANUAL_ENTRY_COLUMNS: [&str; 8] = [
    "date",
    "market",
    "direction",
    "entry",
    "exit_price",
    "quantity",
    "pnl",
    "notes",
];

/// Builds a record set from a manually edited grid.
///
/// Rows whose cells are all blank are dropped. A grid with nothing left is an
/// error, since there is nothing to analyze.
pub fn from_grid(
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
) -> Result<RawRecordSet, IngestError> {
    let entered = rows.len();
    let kept: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .collect();

    if kept.is_empty() {
        return Err(IngestError::EmptyGrid);
    }
    tracing::debug!(entered, kept = kept.len(), "Collected manual trade rows");
    Ok(RawRecordSet::from_rows(columns, kept)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        MANUAL_ENTRY_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn row(cells: [&str; 8]) -> Vec<CellValue> {
        cells.into_iter().map(CellValue::from).collect()
    }

    #[test]
    fn blank_rows_are_dropped() {
        let set = from_grid(
            columns(),
            vec![
                row(["2024-01-01", "ES", "Long", "100", "105", "1", "5", ""]),
                row(["", "", "", "", "", "", "", ""]),
                row(["", "", " ", "", "", "", "", "  "]),
            ],
        )
        .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn all_blank_grid_is_rejected() {
        let result = from_grid(columns(), vec![row(["", "", "", "", "", "", "", ""])]);
        assert!(matches!(result, Err(IngestError::EmptyGrid)));
    }

    #[test]
    fn ragged_grid_row_is_an_error() {
        let result = from_grid(columns(), vec![vec![CellValue::from("x")]]);
        assert!(matches!(result, Err(IngestError::Records(_))));
    }
}
