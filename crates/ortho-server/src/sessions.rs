//! Session bookkeeping for the HTTP API.
//!
//! Each browser session owns one [`PatientSessionStore`]. The registry is
//! held behind a single async mutex for short store operations only; the
//! completion call runs outside it, serialised per patient by [`PlanLocks`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use ortho_core::store::PatientSessionStore;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, PatientSessionStore>,
}

impl SessionRegistry {
    /// Start a session with an empty store.
    pub fn create(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, PatientSessionStore::new());
        id
    }

    pub fn store(&self, id: Uuid) -> Result<&PatientSessionStore, ApiError> {
        self.sessions.get(&id).ok_or_else(|| session_not_found(id))
    }

    pub fn store_mut(&mut self, id: Uuid) -> Result<&mut PatientSessionStore, ApiError> {
        self.sessions.get_mut(&id).ok_or_else(|| session_not_found(id))
    }

    /// Tear a session down, dropping every record in it.
    pub fn remove(&mut self, id: Uuid) -> Result<PatientSessionStore, ApiError> {
        self.sessions.remove(&id).ok_or_else(|| session_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("session not found: {id}"))
}

/// One async mutex per (session, patient name), serialising plan generation
/// for that patient.
///
/// An entry exists only while a generation holds or waits on it; the last
/// [`PlanGuard`] to drop removes it.
#[derive(Clone, Default)]
pub struct PlanLocks {
    inner: Arc<StdMutex<HashMap<PlanKey, Arc<Mutex<()>>>>>,
}

type PlanKey = (Uuid, String);

impl PlanLocks {
    pub async fn acquire(&self, session: Uuid, patient: &str) -> PlanGuard {
        let key = (session, patient.trim().to_string());
        // Created before waiting so a cancelled request still cleans up.
        let mut plan = PlanGuard {
            locks: self.clone(),
            key: key.clone(),
            guard: None,
        };

        let lock = self.entries().entry(key).or_default().clone();
        plan.guard = Some(lock.lock_owned().await);
        plan
    }

    /// Number of (session, patient) pairs with a generation in flight.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PlanKey, Arc<Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Held for the duration of one plan generation.
pub struct PlanGuard {
    locks: PlanLocks,
    key: PlanKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PlanGuard {
    fn drop(&mut self) {
        // Release the patient lock first so its Arc no longer counts.
        drop(self.guard.take());

        let mut entries = self.locks.entries();
        if entries
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            entries.remove(&self.key);
        }
    }
}
