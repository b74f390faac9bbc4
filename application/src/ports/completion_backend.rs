//! Completion backend port
//!
//! Defines the interface for sending a prompt to a remote text-generation
//! backend. This is the only vendor boundary: swapping backends never
//! touches the protocols or the orchestrator.

use async_trait::async_trait;
use chorus_domain::{ChatMessage, ModelProfile};
use thiserror::Error;

/// Errors that can occur during a backend request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}

/// A fully resolved request for one completion attempt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Configured backend identifier
    pub backend: String,
    /// Model name as the backend knows it
    pub model: String,
    /// Role-tagged prompt, in order
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        profile: &ModelProfile,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            backend: profile.backend.clone(),
            model: profile.model.clone(),
            messages,
            temperature,
            max_tokens,
        }
    }

    /// Concatenated content of every message, for assertions and logs
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Backend for text generation
///
/// Implementations (adapters) live in the infrastructure layer. A reply
/// with no content is returned as an empty string, not as an error; the
/// caller decides whether to retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
