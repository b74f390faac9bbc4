//! Retry configuration from TOML (`[retry]` section)

use chorus_application::config::{DEFAULT_TOKEN_BOOSTS, RetryPolicy};
use chorus_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw retry configuration
///
/// # Example
///
/// ```toml
/// [retry]
/// token_boosts = [0, 50, 100, 150]   # one entry per attempt
/// backoff_ms = 250
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub token_boosts: Vec<u32>,
    pub backoff_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            token_boosts: DEFAULT_TOKEN_BOOSTS.to_vec(),
            backoff_ms: 250,
            request_timeout_secs: 60,
        }
    }
}

impl FileRetryConfig {
    pub fn to_retry_policy(&self) -> (RetryPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut boosts = self.token_boosts.clone();
        if boosts.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "retry.token_boosts".to_string(),
                    value: "[]".to_string(),
                },
                "retry.token_boosts is empty, using a single attempt",
            ));
            boosts.push(0);
        }

        let mut timeout = self.request_timeout_secs;
        if timeout == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "retry.request_timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "retry.request_timeout_secs cannot be 0, using 60",
            ));
            timeout = 60;
        }

        let policy = RetryPolicy::default()
            .with_token_boosts(boosts)
            .with_backoff(Duration::from_millis(self.backoff_ms))
            .with_request_timeout(Duration::from_secs(timeout));
        (policy, issues)
    }
}
