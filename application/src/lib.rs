//! Application layer for chorus
//!
//! This crate contains the completion client, the intent classifier, the
//! collaboration protocols, the consensus synthesizer and the orchestration
//! use case, plus the ports they depend on. It depends only on the domain
//! layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_TOKEN_BOOSTS, OrchestrationParams, RetryPolicy};
pub use ports::{
    completion_backend::{BackendError, CompletionBackend, CompletionRequest},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
};
pub use services::{
    completion_client::{CompletionClient, CompletionError, exhausted_message},
    intent_classifier::IntentClassifier,
    synthesizer::ConsensusSynthesizer,
};
pub use use_cases::protocols::{
    CollaborationProtocol, IndependentProtocol, OppositionProtocol, ProtocolInput,
    SupportProtocol, protocol_for,
};
pub use use_cases::run_consensus::{RunConsensusError, RunConsensusInput, RunConsensusUseCase};
