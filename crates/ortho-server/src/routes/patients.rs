use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use ortho_core::models::field::FieldValue;
use ortho_core::models::patient::PatientRecord;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
}

/// Patient names in the session, sorted for display.
pub async fn list_patients(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<String>>, ApiError> {
    let sessions = state.sessions.lock().await;
    let mut names: Vec<String> = sessions
        .store(session_id)?
        .list_patient_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    names.sort();
    Ok(Json(names))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientRecord>), ApiError> {
    let Json(req) = payload?;
    let mut sessions = state.sessions.lock().await;
    let record = sessions.store_mut(session_id)?.create_patient(&req.name)?;
    tracing::info!(session = %session_id, patient = %record.name, "patient created");
    Ok((StatusCode::CREATED, Json(record.clone())))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
) -> Result<Json<PatientRecord>, ApiError> {
    let sessions = state.sessions.lock().await;
    let record = sessions.store(session_id)?.get_patient(&name)?;
    Ok(Json(record.clone()))
}

/// Merge submitted intake fields into the record after validating them
/// against the active profile. Nothing is written if any value is invalid.
///
/// Numbers sent as strings are stored as numbers.
pub async fn update_info(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
    payload: Result<Json<BTreeMap<String, FieldValue>>, JsonRejection>,
) -> Result<Json<PatientRecord>, ApiError> {
    let Json(fields) = payload?;
    let fields = state.profile.normalize(fields);
    state.profile.check(&fields)?;

    let mut sessions = state.sessions.lock().await;
    let record = sessions.store_mut(session_id)?.get_patient_mut(&name)?;
    let updated = fields.len();
    record.merge_info(fields);
    tracing::info!(session = %session_id, patient = %record.name, updated, "intake updated");
    Ok(Json(record.clone()))
}
