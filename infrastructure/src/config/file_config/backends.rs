//! Backend configuration from TOML (`[backends.<id>]` sections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One OpenAI-compatible completion endpoint
///
/// # Example
///
/// ```toml
/// [backends.groq]
/// base_url = "https://api.groq.com/openai/v1"
/// api_key_env = "GROQ_API_KEY"
///
/// [backends.local]
/// base_url = "http://localhost:11434/v1"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use `api_key_env` instead)
    pub api_key: Option<String>,
    /// Extra headers sent with every request
    pub extra_headers: BTreeMap<String, String>,
    /// HTTP timeout override for this backend
    pub timeout_secs: Option<u64>,
}

impl FileBackendConfig {
    pub fn new(base_url: impl Into<String>, api_key_env: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key_env: Some(api_key_env.into()),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// API key: the direct value wins over the environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }
        self.api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Backends available out of the box
pub fn default_backends() -> BTreeMap<String, FileBackendConfig> {
    BTreeMap::from([
        (
            "groq".to_string(),
            FileBackendConfig::new("https://api.groq.com/openai/v1", "GROQ_API_KEY"),
        ),
        (
            "openrouter".to_string(),
            FileBackendConfig::new("https://openrouter.ai/api/v1", "OPENROUTER_API_KEY")
                .with_header("HTTP-Referer", "https://github.com/chorus-chat/chorus")
                .with_header("X-Title", "chorus"),
        ),
    ])
}
