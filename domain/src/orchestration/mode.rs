//! Collaboration mode definitions.
//!
//! Defines [`CollaborationMode`], the closed set of protocols a query can be
//! routed to:
//! - Independent: three parallel perspectives, no inter-turn dependency
//! - Support: sequential enrichment (Lead → Supplement → Final)
//! - Opposition: bounded adversarial debate with a referee

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collaboration protocol selected for a query.
///
/// Exactly one mode is chosen per query and it never changes mid-execution.
/// `Independent` is the default and the classifier's fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationMode {
    /// Comparison mode: parallel diverse perspectives
    #[default]
    Independent,
    /// Supplement mode: each agent builds on the previous ones
    Support,
    /// Debate mode: generator, critic and referee argue to a verdict
    Opposition,
}

impl CollaborationMode {
    pub const ALL: [CollaborationMode; 3] = [
        CollaborationMode::Independent,
        CollaborationMode::Support,
        CollaborationMode::Opposition,
    ];

    /// Wire literal (`independent`, `support`, `opposition`)
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaborationMode::Independent => "independent",
            CollaborationMode::Support => "support",
            CollaborationMode::Opposition => "opposition",
        }
    }

    /// Short description for display
    pub fn description(&self) -> &'static str {
        match self {
            CollaborationMode::Independent => "Comparison: parallel perspectives",
            CollaborationMode::Support => "Supplement: sequential enrichment",
            CollaborationMode::Opposition => "Debate: adversarial fact-check",
        }
    }
}

impl fmt::Display for CollaborationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CollaborationMode {
    type Err = DomainError;

    /// Parses a label after trimming and lower-casing it. Only the three
    /// literal labels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "independent" => Ok(CollaborationMode::Independent),
            "support" => Ok(CollaborationMode::Support),
            "opposition" => Ok(CollaborationMode::Opposition),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}
