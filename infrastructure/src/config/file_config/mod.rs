//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod backends;
mod classifier;
mod logging;
mod orchestration;
mod output;
mod retry;

pub use agents::{FileAgentProfile, default_agents, parse_profile_table};
pub use backends::{FileBackendConfig, default_backends};
pub use classifier::FileClassifierConfig;
pub use logging::FileLoggingConfig;
pub use orchestration::FileOrchestrationConfig;
pub use output::FileOutputConfig;
pub use retry::FileRetryConfig;

use chorus_application::config::{OrchestrationParams, RetryPolicy};
use chorus_domain::{ConfigIssue, ConfigIssueCode, ModelProfile, ProfileTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoints by id
    pub backends: BTreeMap<String, FileBackendConfig>,
    /// Role → model profile table
    pub agents: BTreeMap<String, FileAgentProfile>,
    /// Intent classifier model
    pub classifier: FileClassifierConfig,
    /// Completion retry policy
    pub retry: FileRetryConfig,
    /// Context window and debate bounds
    pub orchestration: FileOrchestrationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            agents: default_agents(),
            classifier: FileClassifierConfig::default(),
            retry: FileRetryConfig::default(),
            orchestration: FileOrchestrationConfig::default(),
            output: FileOutputConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The role table (unknown keys, missing roles, empty model names)
    /// 2. Backend references from agents and the classifier
    /// 3. Numeric ranges in `[retry]` and `[orchestration]`
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Role table
        issues.extend(self.profile_table().1);

        // 2. Backend references
        for (key, agent) in &self.agents {
            self.check_backend(&format!("agents.{}.backend", key), &agent.backend, &mut issues);
        }
        self.check_backend("classifier.backend", &self.classifier.backend, &mut issues);
        if self.classifier.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "classifier.model".to_string(),
                },
                "classifier.model: model name cannot be empty",
            ));
        }

        // 3. Ranges
        issues.extend(self.retry.to_retry_policy().1);
        issues.extend(self.orchestration.to_params().1);

        issues
    }

    fn check_backend(&self, field: &str, backend: &str, issues: &mut Vec<ConfigIssue>) {
        if !self.backends.contains_key(backend.trim()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownBackend {
                    field: field.to_string(),
                    backend: backend.to_string(),
                },
                format!(
                    "{}: backend '{}' is not defined under [backends]",
                    field, backend
                ),
            ));
        }
    }

    pub fn profile_table(&self) -> (ProfileTable, Vec<ConfigIssue>) {
        parse_profile_table(&self.agents)
    }

    pub fn classifier_profile(&self) -> ModelProfile {
        self.classifier.to_profile()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.to_retry_policy().0
    }

    pub fn orchestration_params(&self) -> OrchestrationParams {
        self.orchestration.to_params().0
    }

    /// Display name for a role key, falling back to the model name
    pub fn display_name(&self, role: &str) -> Option<String> {
        self.agents.get(role).map(|agent| {
            agent
                .display_name
                .clone()
                .unwrap_or_else(|| agent.model.clone())
        })
    }
}
