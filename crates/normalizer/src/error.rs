use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Record set could not be rewritten: {0}")]
    Records(#[from] CoreError),
}
