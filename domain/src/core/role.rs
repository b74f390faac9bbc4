//! Agent role value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the three fixed generation slots (Value Object)
///
/// Every turn carries its role from the moment it is produced, so the
/// transcript never needs to recover identity from display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentRole {
    Agent1,
    Agent2,
    Agent3,
}

impl AgentRole {
    /// All roles in their fixed presentation order
    pub const ALL: [AgentRole; 3] = [AgentRole::Agent1, AgentRole::Agent2, AgentRole::Agent3];

    /// Stable identifier used in configuration (`agent1`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Agent1 => "agent1",
            AgentRole::Agent2 => "agent2",
            AgentRole::Agent3 => "agent3",
        }
    }

    /// Human-facing label (`Agent 1`, ...)
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::Agent1 => "Agent 1",
            AgentRole::Agent2 => "Agent 2",
            AgentRole::Agent3 => "Agent 3",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agent1" => Ok(AgentRole::Agent1),
            "agent2" => Ok(AgentRole::Agent2),
            "agent3" => Ok(AgentRole::Agent3),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl Serialize for AgentRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("agent1".parse::<AgentRole>().unwrap(), AgentRole::Agent1);
        assert_eq!(" Agent3 ".parse::<AgentRole>().unwrap(), AgentRole::Agent3);
        assert!("agent4".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_role_order() {
        let mut roles = vec![AgentRole::Agent3, AgentRole::Agent1, AgentRole::Agent2];
        roles.sort();
        assert_eq!(roles, AgentRole::ALL.to_vec());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&AgentRole::Agent2).unwrap();
        assert_eq!(json, "\"agent2\"");
        let parsed: AgentRole = serde_json::from_str("\"agent2\"").unwrap();
        assert_eq!(parsed, AgentRole::Agent2);
    }
}
