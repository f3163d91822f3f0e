use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to build PDF document: {0}")]
    Pdf(String),
}
