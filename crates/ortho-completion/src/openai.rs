//! Chat completions over HTTP against an OpenAI-compatible endpoint.

use std::fmt;

use tracing::{info, warn};

use crate::chat::ChatCompletionRequest;
use crate::error::ServiceError;
use crate::extract;
use crate::service::CompletionService;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Blocking client for `POST {base_url}/chat/completions`.
///
/// No retries and no request timeout are configured here.
#[derive(Clone)]
pub struct OpenAiClient {
    agent: ureq::Agent,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        // Non-2xx responses are read rather than raised so the API's own
        // error message reaches the user.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &redact_key(&self.api_key))
            .finish()
    }
}

impl CompletionService for OpenAiClient {
    fn complete(
        &self,
        system_instruction: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ServiceError> {
        let request = ChatCompletionRequest::new(&self.model, system_instruction, user_prompt);
        let body = serde_json::to_string(&request)
            .map_err(|e| ServiceError::new(format!("failed to encode request: {e}")))?;

        info!(model = %self.model, prompt_len = user_prompt.len(), "requesting completion");

        let mut response = self
            .agent
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| ServiceError::new(e.to_string()))?;

        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ServiceError::new(e.to_string()))?;

        if !status.is_success() {
            let message = extract::error_message(status.as_u16(), &text);
            warn!(model = %self.model, status = status.as_u16(), "completion request failed");
            return Err(ServiceError::new(message));
        }

        let completion = extract::parse_completion(&text)?;

        if let Some(usage) = completion.usage {
            info!(
                model = completion.model.as_deref().unwrap_or(&self.model),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "completion received"
            );
        } else {
            info!(model = %self.model, "completion received");
        }

        Ok(completion.text)
    }
}

/// `sk-abc...wxyz` style hint that never reveals the whole key.
pub fn redact_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
