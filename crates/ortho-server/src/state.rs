use std::sync::Arc;

use tokio::sync::Mutex;

use ortho_completion::service::CompletionService;
use ortho_intake::IntakeProfile;

use crate::sessions::{PlanLocks, SessionRegistry};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<SessionRegistry>>,
    pub plan_locks: PlanLocks,
    pub completion: Arc<dyn CompletionService>,
    /// The deployment's active intake profile.
    pub profile: Arc<dyn IntakeProfile>,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionService>, profile: Arc<dyn IntakeProfile>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(SessionRegistry::default())),
            plan_locks: PlanLocks::default(),
            completion,
            profile,
        }
    }
}
