use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use ortho_completion::plan;
use ortho_core::models::plan::{PlanEntry, TimelinePoint};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GeneratedPlan {
    pub index: usize,
    pub timestamp: jiff::Timestamp,
    pub plan_text: String,
}

/// Generate a plan for the patient and append it to their history.
///
/// The store lock is released while the completion service is called;
/// the per-patient plan lock keeps concurrent requests for the same
/// patient from interleaving.
pub async fn generate_plan(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<GeneratedPlan>), ApiError> {
    // 404 before touching the plan locks.
    {
        let sessions = state.sessions.lock().await;
        sessions.store(session_id)?.get_patient(&name)?;
    }

    let _plan_guard = state.plan_locks.acquire(session_id, &name).await;

    let request = {
        let sessions = state.sessions.lock().await;
        let record = sessions.store(session_id)?.get_patient(&name)?;
        plan::prepare(record, state.profile.as_ref())?
    };

    tracing::info!(
        session = %session_id,
        patient = %request.patient_name,
        profile = state.profile.id(),
        "generating treatment plan"
    );

    let service = state.completion.clone();
    let plan_text = tokio::task::spawn_blocking(move || request.send(service.as_ref())).await??;

    let mut sessions = state.sessions.lock().await;
    let record = sessions.store_mut(session_id)?.get_patient_mut(&name)?;
    let index = plan::record_plan(record, plan_text);
    let entry = &record.treatment_plans()[index];

    Ok((
        StatusCode::CREATED,
        Json(GeneratedPlan {
            index,
            timestamp: entry.timestamp,
            plan_text: entry.plan_text.clone(),
        }),
    ))
}

pub async fn list_plans(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
) -> Result<Json<Vec<PlanEntry>>, ApiError> {
    let sessions = state.sessions.lock().await;
    let record = sessions.store(session_id)?.get_patient(&name)?;
    Ok(Json(record.treatment_plans().to_vec()))
}

/// Chart data: one point per plan, keyed by history index and timestamp.
pub async fn timeline(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(Uuid, String)>,
) -> Result<Json<Vec<TimelinePoint>>, ApiError> {
    let sessions = state.sessions.lock().await;
    let record = sessions.store(session_id)?.get_patient(&name)?;
    Ok(Json(record.timeline()))
}
