#![allow(dead_code)]

use std::sync::Mutex;

use ortho_completion::error::ServiceError;
use ortho_completion::service::CompletionService;
use ortho_core::models::field::FieldValue;
use ortho_core::models::patient::PatientRecord;

/// Completion service that replays canned replies and records each call.
pub struct StubService {
    replies: Mutex<Vec<Result<String, ServiceError>>>,
    pub calls: Mutex<Vec<(Option<String>, String)>>,
}

impl StubService {
    /// Replies are returned in order; the last one repeats.
    pub fn new(replies: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(ServiceError::new(message))])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CompletionService for StubService {
    fn complete(
        &self,
        system_instruction: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instruction.map(str::to_string), user_prompt.to_string()));

        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        }
    }
}

/// The worked example: a 12-year-old with mild crowding and an overbite.
pub fn alice() -> PatientRecord {
    let mut record = PatientRecord::new("Alice");
    record.set_field("age", 12_i64);
    record.set_field("gender", "Female");
    record.set_field("mainConcern", "crowding");
    record.set_field("biteType", "Overbite");
    record.set_field("crowding", "Mild");
    record.set_field("treatmentHistory", FieldValue::from(""));
    record
}
