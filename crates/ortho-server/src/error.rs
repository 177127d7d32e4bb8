use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ortho_completion::error::{PlanError, ServiceError};
use ortho_core::error::CoreError;
use ortho_intake::error::IntakeError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    IncompletePatientData { missing: Vec<String> },
    /// The completion service failed; the message is shown verbatim.
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, missing_fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::IncompletePatientData { missing } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("missing required fields: {}", missing.join(", ")),
                Some(missing),
            ),
            ApiError::Upstream(msg) => {
                tracing::warn!("completion service error: {msg}");
                (StatusCode::BAD_GATEWAY, msg, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: message,
            missing_fields,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidName => ApiError::BadRequest(e.to_string()),
            CoreError::DuplicateName(_) => ApiError::Conflict(e.to_string()),
            CoreError::NotFound(_) => ApiError::NotFound(e.to_string()),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::UnknownProfile(_) => ApiError::NotFound(e.to_string()),
            IntakeError::Invalid(_) => ApiError::BadRequest(e.to_string()),
            IntakeError::EmptyRequiredFields(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Upstream(e.message)
    }
}

impl From<PlanError> for ApiError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::IncompletePatientData { missing } => {
                ApiError::IncompletePatientData { missing }
            }
            PlanError::Service(e) => e.into(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
