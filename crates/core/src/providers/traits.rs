use async_trait::async_trait;

use crate::errors::CoreError;

/// A text-generation backend the mentor can talk to.
///
/// Implementations only move text back and forth; the mentor persona and
/// the fallback behaviour live in `MentorService`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MentorProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Generate a reply to `prompt` under the given system instruction.
    async fn generate_text(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, CoreError>;
}
