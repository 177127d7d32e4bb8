use crate::error::ServiceError;

/// The completion boundary: prompt text in, plan text out.
///
/// One blocking request/response. Implementations do not retry.
pub trait CompletionService: Send + Sync {
    fn complete(
        &self,
        system_instruction: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ServiceError>;
}
