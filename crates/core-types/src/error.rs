use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Row has {found} cells but the record set has {expected} columns")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Column values have length {found} but the record set has {expected} rows")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
