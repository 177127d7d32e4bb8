//! Response extraction.
//!
//! One contract for every caller: deserialize the typed response and take
//! `choices[0].message.content`. Anything else is a [`ServiceError`].

use crate::chat::{ChatCompletionResponse, ErrorResponse, Usage};
use crate::error::ServiceError;

/// The useful part of a successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

/// Parse a 2xx response body.
pub fn parse_completion(body: &str) -> Result<Completion, ServiceError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::new(format!("malformed completion response: {e}")))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::new("completion response contained no choices"))?
        .message
        .content
        .ok_or_else(|| ServiceError::new("completion response contained no message content"))?;

    Ok(Completion {
        text,
        model: response.model,
        usage: response.usage,
    })
}

/// Describe a non-2xx response, preferring the API's own error message.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(envelope) => format!("HTTP {status}: {}", envelope.error.message),
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => format!("HTTP {status}: {}", body.trim()),
    }
}
