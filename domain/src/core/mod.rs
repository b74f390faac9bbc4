//! Core domain concepts shared across all subdomains.
//!
//! - [`role::AgentRole`]: the three fixed generation slots
//! - [`profile::ModelProfile`]: per-role backend/model settings
//! - [`query::Query`]: a validated query plus bounded conversation history
//! - [`message::ChatMessage`]: role-tagged prompt messages
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod message;
pub mod profile;
pub mod query;
pub mod role;
