//! Domain layer for chorus
//!
//! This crate contains the core types of the orchestration engine. It has
//! no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Role**: one of three fixed generation slots (`agent1..agent3`),
//!   each with its own [`ModelProfile`]
//! - **Mode**: the collaboration protocol a query is routed to
//!   ([`CollaborationMode`]: independent, support, opposition)
//! - **Turn**: one generated utterance, tagged with its role and mode
//! - **Context window**: the last few conversation entries flattened into
//!   a single string shared by every stage of a run

pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    message::{ChatMessage, MessageRole},
    profile::{ModelProfile, ProfileTable},
    query::{ContextEntry, DEFAULT_HISTORY_LIMIT, Query, build_context_window},
    role::AgentRole,
};
pub use orchestration::{
    debate::{
        DebateMachine, DebateOutcome, DebateStep, MAX_DEBATE_ROUNDS, VERDICT_PHRASE,
        is_verdict_reached,
    },
    entities::{Stage, Turn, TurnKind},
    mode::CollaborationMode,
    value_objects::{Classification, ClassificationDetail, ModeSource, OrchestrationResult},
};
pub use prompt::{ClassifierPrompt, PromptTemplate, parse_classification_detail};
