use crate::errors::CoreError;
use crate::models::settings::Settings;
use crate::providers::gemini::GeminiProvider;
use crate::providers::traits::MentorProvider;

/// Persona the mentor answers in.
pub const MENTOR_PERSONA: &str = "You are a sports betting mentor named Benedito. \
Your main focus is teaching discipline, bankroll management and emotional control. \
NEVER give specific betting tips or encourage high-risk bets. Always promote a safe, \
methodical, long-term approach. Your answers should be calm, encouraging and \
educational, formatted in simple markdown.";

/// Reply shown when the provider cannot be reached.
pub const FALLBACK_REPLY: &str =
    "Sorry, something went wrong while reaching my system. Please try again later.";

/// Settings key holding the Gemini API key.
pub const GEMINI_KEY: &str = "gemini";

/// Chat mentor on top of a [`MentorProvider`].
pub struct MentorService {
    provider: Option<Box<dyn MentorProvider>>,
}

impl MentorService {
    pub fn new(provider: Box<dyn MentorProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A mentor with no backend. `ask` always returns the fallback reply.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Build from stored settings: Gemini if a `"gemini"` key is present.
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.api_keys.get(GEMINI_KEY) {
            Some(key) => Self::new(Box::new(GeminiProvider::new(
                key.clone(),
                settings.mentor_model.clone(),
            ))),
            None => Self::unconfigured(),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    #[must_use]
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Ask the mentor, surfacing provider errors.
    pub async fn ask_strict(&self, prompt: &str) -> Result<String, CoreError> {
        let provider = self.provider.as_deref().ok_or(CoreError::NoProvider)?;
        provider.generate_text(MENTOR_PERSONA, prompt).await
    }

    /// Ask the mentor. Failures are logged and answered with [`FALLBACK_REPLY`].
    pub async fn ask(&self, prompt: &str) -> String {
        match self.ask_strict(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider_name().unwrap_or("none"),
                    error = %e,
                    "mentor request failed"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
