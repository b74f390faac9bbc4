//! Per-role model configuration

use crate::core::role::AgentRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend, model and default sampling settings for one role (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Identifier of the configured backend (e.g. `groq`, `openrouter`)
    pub backend: String,
    /// Model name as the backend knows it
    pub model: String,
    /// Default sampling temperature
    pub temperature: f32,
    /// Default completion token budget
    pub max_tokens: u32,
}

impl ModelProfile {
    pub fn new(backend: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 400,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl std::fmt::Display for ModelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} via {}", self.model, self.backend)
    }
}

/// The static role → profile table, loaded once at startup
///
/// Lookups return `None` for a role that was never configured; the
/// completion client turns that into a configuration error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileTable {
    profiles: BTreeMap<AgentRole, ModelProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, role: AgentRole, profile: ModelProfile) -> Self {
        self.profiles.insert(role, profile);
        self
    }

    pub fn get(&self, role: AgentRole) -> Option<&ModelProfile> {
        self.profiles.get(&role)
    }

    /// Roles that have no profile
    pub fn missing_roles(&self) -> Vec<AgentRole> {
        AgentRole::ALL
            .into_iter()
            .filter(|role| !self.profiles.contains_key(role))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_roles().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentRole, &ModelProfile)> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_roles() {
        let table = ProfileTable::new()
            .with_profile(AgentRole::Agent1, ModelProfile::new("groq", "model-a"));
        assert_eq!(
            table.missing_roles(),
            vec![AgentRole::Agent2, AgentRole::Agent3]
        );
        assert!(!table.is_complete());
    }

    #[test]
    fn test_complete_table() {
        let table = AgentRole::ALL.into_iter().fold(ProfileTable::new(), |t, role| {
            t.with_profile(role, ModelProfile::new("groq", role.as_str()))
        });
        assert!(table.is_complete());
        assert_eq!(table.get(AgentRole::Agent2).unwrap().model, "agent2");
    }

    #[test]
    fn test_profile_builders() {
        let profile = ModelProfile::new("openrouter", "llama")
            .with_temperature(0.2)
            .with_max_tokens(64);
        assert_eq!(profile.temperature, 0.2);
        assert_eq!(profile.max_tokens, 64);
        assert_eq!(profile.to_string(), "llama via openrouter");
    }
}
