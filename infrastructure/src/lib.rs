//! Infrastructure layer for chorus
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenAI-compatible completion backends, the
//! layered configuration loader and the JSONL transcript logger.

pub mod config;
pub mod logging;
pub mod providers;

pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiCompatBackend, RoutingBackend};
