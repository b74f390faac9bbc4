//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording the transcript of
//! each run (classification, every turn, synthesis) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the transcript in a
//! machine-readable format (JSONL).

use chorus_domain::{Classification, Turn};
use serde_json::{Value, json};

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (`classification`, `turn`, `synthesis`).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn classification(query: &str, classification: &Classification) -> Self {
        Self::new(
            "classification",
            json!({
                "query": query,
                "mode": classification.mode,
                "source": classification.source,
            }),
        )
    }

    pub fn turn(turn: &Turn) -> Self {
        Self::new(
            "turn",
            serde_json::to_value(turn).unwrap_or_else(|_| json!({ "speaker": turn.speaker() })),
        )
    }

    pub fn synthesis(final_answer: &str, turn_count: usize) -> Self {
        Self::new(
            "synthesis",
            json!({
                "final_answer": final_answer,
                "turns": turn_count,
            }),
        )
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that a broken log
/// never interrupts a run; implementations swallow their own errors.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
