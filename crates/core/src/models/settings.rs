use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model used by the mentor when none is configured.
pub const DEFAULT_MENTOR_MODEL: &str = "gemini-2.5-flash";

/// User-configurable settings, stored inside the encrypted tracker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "gemini"). Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// Text-generation model the mentor talks to.
    #[serde(default = "default_mentor_model")]
    pub mentor_model: String,
}

fn default_mentor_model() -> String {
    DEFAULT_MENTOR_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            mentor_model: default_mentor_model(),
        }
    }
}
