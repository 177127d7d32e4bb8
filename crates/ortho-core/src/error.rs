use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("patient name must not be empty")]
    InvalidName,

    #[error("patient already exists: {0}")]
    DuplicateName(String),

    #[error("patient not found: {0}")]
    NotFound(String),
}
