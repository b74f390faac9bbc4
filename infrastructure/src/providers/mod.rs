//! Completion backend adapters

pub mod openai_compat;
pub mod routing;

pub use openai_compat::OpenAiCompatBackend;
pub use routing::RoutingBackend;
