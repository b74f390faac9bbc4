//! Intent classifier configuration from TOML (`[classifier]` section)

use chorus_application::services::intent_classifier::{
    CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE,
};
use chorus_domain::ModelProfile;
use serde::{Deserialize, Serialize};

/// Raw classifier configuration
///
/// # Example
///
/// ```toml
/// [classifier]
/// backend = "groq"
/// model = "llama-3.3-70b-versatile"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClassifierConfig {
    pub backend: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileClassifierConfig {
    fn default() -> Self {
        Self {
            backend: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: CLASSIFIER_TEMPERATURE,
            max_tokens: CLASSIFIER_MAX_TOKENS,
        }
    }
}

impl FileClassifierConfig {
    pub fn to_profile(&self) -> ModelProfile {
        ModelProfile::new(self.backend.trim(), self.model.trim())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}
