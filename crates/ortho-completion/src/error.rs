use thiserror::Error;

/// Any failure of the completion service: authentication, network, rate
/// limit, or a malformed response. Not subdivided; the message is shown to
/// the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("incomplete patient data, missing: {}", .missing.join(", "))]
    IncompletePatientData { missing: Vec<String> },

    #[error("completion service error: {0}")]
    Service(#[from] ServiceError),
}
