//! In-memory patient store for one interactive session.
//!
//! A store starts empty and is dropped with its session. Nothing is
//! persisted. Callers that share a store between threads wrap it in their
//! own lock.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::models::patient::PatientRecord;

#[derive(Debug, Clone, Default)]
pub struct PatientSessionStore {
    patients: HashMap<String, PatientRecord>,
}

impl PatientSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record with empty intake and history.
    ///
    /// The name is trimmed before use. Fails with [`CoreError::InvalidName`]
    /// for an empty or whitespace name and [`CoreError::DuplicateName`] when
    /// the name is already taken; the store is unchanged in both cases.
    pub fn create_patient(&mut self, name: &str) -> Result<&mut PatientRecord, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidName);
        }
        if self.patients.contains_key(name) {
            return Err(CoreError::DuplicateName(name.to_string()));
        }

        Ok(self
            .patients
            .entry(name.to_string())
            .or_insert_with(|| PatientRecord::new(name)))
    }

    pub fn get_patient(&self, name: &str) -> Result<&PatientRecord, CoreError> {
        self.patients
            .get(name.trim())
            .ok_or_else(|| CoreError::NotFound(name.to_string()))
    }

    pub fn get_patient_mut(&mut self, name: &str) -> Result<&mut PatientRecord, CoreError> {
        self.patients
            .get_mut(name.trim())
            .ok_or_else(|| CoreError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patients.contains_key(name.trim())
    }

    /// Names of all patients, in no particular order.
    pub fn list_patient_names(&self) -> Vec<&str> {
        self.patients.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
