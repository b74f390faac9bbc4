//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Invalid collaboration mode: '{0}' (expected independent, support or opposition)")]
    InvalidMode(String),

    #[error("Invalid agent role: '{0}' (expected agent1, agent2 or agent3)")]
    InvalidRole(String),
}
