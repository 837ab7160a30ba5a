use super::types::*;
use crate::Result;
use async_trait::async_trait;
use tracing::{debug, error};

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short label for logs, e.g. "ollama".
    fn backend_name(&self) -> &str;

    /// Performs the backend call, surfacing every failure.
    async fn try_generate(&self, request: &InferenceRequest) -> Result<String>;

    /// Performs the backend call and degrades any failure to
    /// [`Completion::Fallback`]. Never returns an error.
    async fn generate(&self, request: &InferenceRequest) -> Completion {
        if let Err(e) = request.validate() {
            error!("Rejected request to {}: {}", self.backend_name(), e);
            return Completion::fallback(e.to_string());
        }

        debug!(
            "Calling {} with model {} ({} prompt chars)",
            self.backend_name(),
            request.model,
            request.prompt.len()
        );

        match self.try_generate(request).await {
            Ok(text) => Completion::Generated(text),
            Err(e) => {
                error!("Error calling {}: {}", self.backend_name(), e);
                Completion::fallback(e.to_string())
            }
        }
    }
}
