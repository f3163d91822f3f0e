use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read trade log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("The file has no header row")]
    NoColumns,

    #[error("No trade rows were entered")]
    EmptyGrid,

    #[error("Malformed record set: {0}")]
    Records(#[from] CoreError),
}
