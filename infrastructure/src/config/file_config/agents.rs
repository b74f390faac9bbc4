//! Per-role model profiles from TOML (`[agents.<role>]` sections)

use chorus_domain::{AgentRole, ConfigIssue, ConfigIssueCode, ModelProfile, ProfileTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw profile for one role
///
/// # Example
///
/// ```toml
/// [agents.agent2]
/// backend = "openrouter"
/// model = "meta-llama/llama-4-scout"
/// display_name = "Scout"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentProfile {
    /// Backend id from `[backends]`
    pub backend: String,
    pub model: String,
    /// Name shown next to the role in diagnostics
    pub display_name: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileAgentProfile {
    fn default() -> Self {
        Self {
            backend: "groq".to_string(),
            model: String::new(),
            display_name: None,
            temperature: 0.7,
            max_tokens: 400,
        }
    }
}

impl FileAgentProfile {
    fn with_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }

    pub fn to_profile(&self) -> ModelProfile {
        ModelProfile::new(self.backend.trim(), self.model.trim())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// Default role table
pub fn default_agents() -> BTreeMap<String, FileAgentProfile> {
    BTreeMap::from([
        (
            "agent1".to_string(),
            FileAgentProfile::with_model("openai/gpt-oss-120b"),
        ),
        (
            "agent2".to_string(),
            FileAgentProfile::with_model("meta-llama/llama-4-scout-17b-16e-instruct"),
        ),
        (
            "agent3".to_string(),
            FileAgentProfile::with_model("moonshotai/kimi-k2-instruct-0905"),
        ),
    ])
}

/// Build the profile table, collecting issues instead of failing.
///
/// Unknown role keys are warnings and skipped; missing roles and empty
/// model names are errors.
pub fn parse_profile_table(
    agents: &BTreeMap<String, FileAgentProfile>,
) -> (ProfileTable, Vec<ConfigIssue>) {
    let mut table = ProfileTable::new();
    let mut issues = Vec::new();

    for (key, agent) in agents {
        let Ok(role) = key.parse::<AgentRole>() else {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownRole { key: key.clone() },
                format!(
                    "agents.{}: unknown role (expected agent1, agent2 or agent3), ignored",
                    key
                ),
            ));
            continue;
        };

        if agent.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: format!("agents.{}.model", key),
                },
                format!("agents.{}.model: model name cannot be empty", key),
            ));
            continue;
        }

        table = table.with_profile(role, agent.to_profile());
    }

    for role in table.missing_roles() {
        if agents.contains_key(role.as_str()) {
            continue;
        }
        issues.push(ConfigIssue::error(
            ConfigIssueCode::MissingRole {
                role: role.to_string(),
            },
            format!("agents.{} is not configured", role),
        ));
    }

    (table, issues)
}
