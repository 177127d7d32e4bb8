use axum::Json;
use axum::extract::{Path, State};

use ortho_intake::{ProfileDescriptor, all_profiles, get_profile};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_profiles() -> Json<Vec<ProfileDescriptor>> {
    Json(all_profiles().iter().map(|p| p.describe()).collect())
}

pub async fn get_profile_detail(Path(id): Path<String>) -> Result<Json<ProfileDescriptor>, ApiError> {
    let profile =
        get_profile(&id).ok_or_else(|| ApiError::NotFound(format!("intake profile not found: {id}")))?;
    Ok(Json(profile.describe()))
}

/// The profile this deployment validates and generates against, including
/// any configured required-field override.
pub async fn active_profile(State(state): State<AppState>) -> Json<ProfileDescriptor> {
    Json(state.profile.describe())
}
