//! ortho-server library root.
//!
//! The binary in `main.rs` only loads configuration and serves [`router`];
//! everything else lives here so integration tests can drive the API
//! in-process.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Intake form definitions
        .route("/profile", get(routes::profiles::active_profile))
        .route("/profiles", get(routes::profiles::list_profiles))
        .route("/profiles/{id}", get(routes::profiles::get_profile_detail))
        // One-shot generation, no session state
        .route(
            "/get_treatment_plan",
            post(routes::legacy::get_treatment_plan),
        )
        // Sessions
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{session_id}",
            delete(routes::sessions::delete_session),
        )
        // Patients
        .route(
            "/sessions/{session_id}/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/sessions/{session_id}/patients/{name}",
            get(routes::patients::get_patient),
        )
        .route(
            "/sessions/{session_id}/patients/{name}/info",
            put(routes::patients::update_info),
        )
        // Treatment plans
        .route(
            "/sessions/{session_id}/patients/{name}/plans",
            get(routes::plans::list_plans).post(routes::plans::generate_plan),
        )
        .route(
            "/sessions/{session_id}/patients/{name}/timeline",
            get(routes::plans::timeline),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
