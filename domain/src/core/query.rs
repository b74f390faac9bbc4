//! Query value object and the bounded conversation context window

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of trailing history entries that make it into the context window
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One prior message in the conversation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Who produced the message (`user`, `assistant`, `agent`, ...)
    pub role: String,
    /// Display name of the speaker; falls back to `role` when empty
    #[serde(default, alias = "name")]
    pub speaker: String,
    /// Message body
    #[serde(alias = "content")]
    pub text: String,
}

impl ContextEntry {
    pub fn new(
        role: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Label used when the entry is flattened into the context window
    pub fn speaker_label(&self) -> &str {
        if self.speaker.trim().is_empty() {
            &self.role
        } else {
            &self.speaker
        }
    }

    fn render(&self) -> String {
        format!("{}: {}", self.speaker_label(), self.text)
    }
}

/// Flatten the last `limit` entries into `"{speaker}: {text}"` lines.
///
/// Returns an empty string when there is no history.
pub fn build_context_window(history: &[ContextEntry], limit: usize) -> String {
    let start = history.len().saturating_sub(limit);
    history[start..]
        .iter()
        .map(ContextEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A user query plus optional prior conversation (Value Object)
///
/// Constructed per request and discarded once the result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    #[serde(default)]
    history: Vec<ContextEntry>,
}

impl Query {
    /// Create a query, rejecting empty or whitespace-only text
    pub fn try_new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self {
            text,
            history: Vec::new(),
        })
    }

    pub fn with_history(mut self, history: Vec<ContextEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &[ContextEntry] {
        &self.history
    }

    /// Context string built from at most `limit` trailing history entries
    pub fn context_window(&self, limit: usize) -> String {
        build_context_window(&self.history, limit)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
