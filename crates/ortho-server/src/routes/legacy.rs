use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use serde::Serialize;

use ortho_completion::plan;
use ortho_core::models::field::FieldValue;
use ortho_core::models::patient::PatientRecord;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TreatmentPlanResponse {
    pub treatment_plan: String,
}

/// Stateless one-shot generation: intake fields in, plan text out.
/// Nothing is stored.
pub async fn get_treatment_plan(
    State(state): State<AppState>,
    payload: Result<Json<BTreeMap<String, FieldValue>>, JsonRejection>,
) -> Result<Json<TreatmentPlanResponse>, ApiError> {
    let Json(fields) = payload?;
    let fields = state.profile.normalize(fields);
    state.profile.check(&fields)?;

    let mut record = PatientRecord::new("anonymous");
    record.merge_info(fields);
    let request = plan::prepare(&record, state.profile.as_ref())?;

    let service = state.completion.clone();
    let treatment_plan =
        tokio::task::spawn_blocking(move || request.send(service.as_ref())).await??;

    Ok(Json(TreatmentPlanResponse { treatment_plan }))
}
