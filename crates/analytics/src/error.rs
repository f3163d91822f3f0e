use core_types::CanonicalField;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Required field '{0}' could not be found or derived")]
    MissingRequiredField(CanonicalField),
}
