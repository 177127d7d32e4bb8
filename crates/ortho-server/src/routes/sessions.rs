use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let id = state.sessions.lock().await.create();
    tracing::info!(session = %id, "session started");
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let store = state.sessions.lock().await.remove(id)?;
    tracing::info!(session = %id, patients = store.len(), "session ended");
    Ok(StatusCode::NO_CONTENT)
}
