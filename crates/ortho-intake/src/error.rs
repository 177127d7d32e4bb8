use thiserror::Error;

use crate::fields::FieldValidationError;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown intake profile: {0}")]
    UnknownProfile(String),

    #[error("required-field override for profile {0} names no fields")]
    EmptyRequiredFields(String),

    #[error("invalid intake fields: {}", format_errors(.0))]
    Invalid(Vec<FieldValidationError>),
}

fn format_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
