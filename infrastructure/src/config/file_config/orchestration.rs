//! Orchestration configuration from TOML (`[orchestration]` section)

use chorus_application::config::OrchestrationParams;
use chorus_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_HISTORY_LIMIT, MAX_DEBATE_ROUNDS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// Trailing history entries included in the context window
    pub history_limit: usize,
    /// Debate round limit for the opposition mode
    pub max_rounds: u32,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_rounds: MAX_DEBATE_ROUNDS,
        }
    }
}

impl FileOrchestrationConfig {
    pub fn to_params(&self) -> (OrchestrationParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.history_limit > DEFAULT_HISTORY_LIMIT {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "orchestration.history_limit".to_string(),
                    value: self.history_limit.to_string(),
                },
                format!(
                    "orchestration.history_limit must be at most {}, clamping {}",
                    DEFAULT_HISTORY_LIMIT, self.history_limit
                ),
            ));
        }
        if !(1..=MAX_DEBATE_ROUNDS).contains(&self.max_rounds) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "orchestration.max_rounds".to_string(),
                    value: self.max_rounds.to_string(),
                },
                format!(
                    "orchestration.max_rounds must be between 1 and {}, clamping {}",
                    MAX_DEBATE_ROUNDS, self.max_rounds
                ),
            ));
        }

        let params = OrchestrationParams::default()
            .with_history_limit(self.history_limit)
            .with_max_rounds(self.max_rounds);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_clamped_with_warning() {
        let config = FileOrchestrationConfig {
            history_limit: 4,
            max_rounds: 9,
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.max_rounds, MAX_DEBATE_ROUNDS);
        assert_eq!(params.history_limit, 4);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_history_limit_clamped_with_warning() {
        let config = FileOrchestrationConfig {
            history_limit: 50,
            max_rounds: 3,
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(params.max_rounds, 3);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "orchestration.history_limit"
        ));
    }
}
