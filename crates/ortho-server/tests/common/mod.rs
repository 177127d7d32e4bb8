#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use ortho_completion::error::ServiceError;
use ortho_completion::service::CompletionService;
use ortho_server::state::AppState;

/// Completion service with a fixed reply and an optional delay per call.
pub struct StubService {
    reply: Result<String, ServiceError>,
    delay: Duration,
    pub prompts: Mutex<Vec<String>>,
}

impl StubService {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(ServiceError::new(message)),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl CompletionService for StubService {
    fn complete(
        &self,
        _system_instruction: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ServiceError> {
        std::thread::sleep(self.delay);
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.reply.clone()
    }
}

pub fn app(service: Arc<StubService>) -> Router {
    app_with_state(service).0
}

/// The router plus a handle on its shared state for inspection.
pub fn app_with_state(service: Arc<StubService>) -> (Router, AppState) {
    let profile = ortho_intake::get_profile("basic").unwrap();
    let state = AppState::new(service, Arc::from(profile));
    (ortho_server::router(state.clone()), state)
}

/// Send a raw JSON body, bypassing `serde_json::Value`.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Send one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

pub fn alice_fields() -> Value {
    serde_json::json!({
        "age": 12,
        "gender": "Female",
        "mainConcern": "crowding",
        "biteType": "Overbite",
        "crowding": "Mild",
        "treatmentHistory": ""
    })
}
