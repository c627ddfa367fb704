//! The backend contract consumed by the knowledge answerer.

use crate::error::Result;
use async_trait::async_trait;

/// A text-in, text-out language model.
///
/// Implementations are long-lived handles, configured once and then shared
/// read-only; `generate` must not depend on state left by an earlier call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one prompt and return the model's reply verbatim.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Short backend label used in logs and audit records ("openai", "gemini").
    fn name(&self) -> &str;
}
