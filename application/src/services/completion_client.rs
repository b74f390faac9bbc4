//! Resilient completion client
//!
//! Wraps a [`CompletionBackend`] with the per-role profile table and the
//! bounded retry policy. Transient failures (empty replies, backend errors,
//! timeouts) are retried with an increasing token budget; after the budget
//! is exhausted the client returns degraded text instead of an error.
//! Only configuration errors ever reach the caller.

use crate::config::RetryPolicy;
use crate::ports::completion_backend::{BackendError, CompletionBackend, CompletionRequest};
use chorus_domain::{AgentRole, ChatMessage, ModelProfile, ProfileTable, PromptTemplate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors surfaced by the completion client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("No model profile configured for role '{0}'")]
    UnknownRole(AgentRole),
}

/// Text returned when every attempt produced an empty reply
pub fn exhausted_message(attempts: usize) -> String {
    format!(
        "⚠️ Agent did not respond properly after {} attempts. Please try again.",
        attempts
    )
}

/// Why one attempt did not produce usable text
enum AttemptFailure {
    Empty,
    Backend(BackendError),
}

/// Completion client shared by the classifier, the protocols and the synthesizer
///
/// Holds no mutable state, so a single instance can serve any number of
/// concurrent calls.
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    profiles: ProfileTable,
    retry: RetryPolicy,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, profiles: ProfileTable) -> Self {
        Self {
            backend,
            profiles,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn backend(&self) -> &Arc<dyn CompletionBackend> {
        &self.backend
    }

    fn profile(&self, role: AgentRole) -> Result<&ModelProfile, CompletionError> {
        self.profiles
            .get(role)
            .ok_or(CompletionError::UnknownRole(role))
    }

    /// Generate text for `role`.
    ///
    /// Returns the first non-empty reply (trimmed). On exhaustion returns
    /// either the empty-reply sentinel or a descriptive error string,
    /// depending on how the last attempt failed.
    pub async fn complete(
        &self,
        role: AgentRole,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let profile = self.profile(role)?;
        let attempts = self.retry.max_attempts();
        let mut last_failure = AttemptFailure::Empty;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.retry.delay_before(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            let budget = max_tokens.saturating_add(self.retry.boost(attempt));
            let request = CompletionRequest::new(profile, messages.clone(), temperature, budget);
            debug!(
                "{} attempt {}/{} on {} (max_tokens={})",
                role,
                attempt + 1,
                attempts,
                profile,
                budget
            );

            match self.attempt(&request).await {
                Ok(text) => {
                    if attempt > 0 {
                        info!("{} responded on attempt {}", role, attempt + 1);
                    }
                    return Ok(text);
                }
                Err(AttemptFailure::Empty) => {
                    warn!("{} returned empty output on attempt {}", role, attempt + 1);
                    last_failure = AttemptFailure::Empty;
                }
                Err(AttemptFailure::Backend(e)) => {
                    warn!("{} failed on attempt {}: {}", role, attempt + 1, e);
                    last_failure = AttemptFailure::Backend(e);
                }
            }
        }

        Ok(match last_failure {
            AttemptFailure::Empty => {
                warn!("{} failed after {} attempts (blank output)", role, attempts);
                exhausted_message(attempts)
            }
            AttemptFailure::Backend(e) => {
                warn!("{} failed after {} attempts: {}", role, attempts, e);
                format!(
                    "Error: {} ({}) failed after {} attempts: {}",
                    role, profile.model, attempts, e
                )
            }
        })
    }

    /// Complete using the role's configured temperature and token budget
    pub async fn complete_with_defaults(
        &self,
        role: AgentRole,
        messages: Vec<ChatMessage>,
    ) -> Result<String, CompletionError> {
        let profile = self.profile(role)?;
        let (temperature, max_tokens) = (profile.temperature, profile.max_tokens);
        self.complete(role, messages, temperature, max_tokens).await
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<String, AttemptFailure> {
        let timeout = self.retry.request_timeout;
        let reply = tokio::time::timeout(timeout, self.backend.complete(request))
            .await
            .map_err(|_| AttemptFailure::Backend(BackendError::Timeout(timeout.as_secs())))?
            .map_err(AttemptFailure::Backend)?;

        let text = reply.trim();
        if text.is_empty() {
            Err(AttemptFailure::Empty)
        } else {
            Ok(text.to_string())
        }
    }

    /// Single-shot reachability check for `role` (no retry).
    ///
    /// Uses the role's configured sampling; a blank reply counts as a failure.
    pub async fn check_connection(&self, role: AgentRole) -> bool {
        let Ok(profile) = self.profile(role) else {
            return false;
        };
        let request = CompletionRequest::new(
            profile,
            PromptTemplate::connection_check(),
            profile.temperature,
            profile.max_tokens,
        );
        match self.attempt(&request).await {
            Ok(_) => true,
            Err(AttemptFailure::Empty) => {
                warn!("Connection check for {} returned blank output", role);
                false
            }
            Err(AttemptFailure::Backend(e)) => {
                warn!("Connection check for {} failed: {}", role, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend that replays scripted replies and records every request
    pub(crate) struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String, BackendError>>>,
        fallback: Result<String, BackendError>,
        pub(crate) requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: Vec<Result<String, BackendError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                fallback: Ok(String::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Reply with `fallback` once the script runs out
        pub(crate) fn with_fallback(mut self, fallback: Result<String, BackendError>) -> Self {
            self.fallback = fallback;
            self
        }

        pub(crate) fn texts(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub(crate) fn recorded(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    pub(crate) fn test_profiles() -> ProfileTable {
        ProfileTable::new()
            .with_profile(AgentRole::Agent1, ModelProfile::new("mock", "model-1"))
            .with_profile(AgentRole::Agent2, ModelProfile::new("mock", "model-2"))
            .with_profile(AgentRole::Agent3, ModelProfile::new("mock", "model-3"))
    }

    pub(crate) fn client_for(backend: Arc<ScriptedBackend>) -> CompletionClient {
        CompletionClient::new(backend, test_profiles()).with_retry_policy(RetryPolicy::immediate())
    }

    fn prompt() -> Vec<ChatMessage> {
        vec![ChatMessage::user("hello")]
    }

    #[tokio::test]
    async fn test_returns_trimmed_first_reply() {
        let backend = Arc::new(ScriptedBackend::texts(&["  hi there \n"]));
        let client = client_for(backend.clone());

        let text = client.complete(AgentRole::Agent1, prompt(), 0.5, 100).await.unwrap();

        assert_eq!(text, "hi there");
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_fourth_attempt_succeeds() {
        let backend = Arc::new(ScriptedBackend::texts(&["", "  ", "\n", "ok"]));
        let client = client_for(backend.clone());

        let text = client.complete(AgentRole::Agent2, prompt(), 0.5, 100).await.unwrap();

        assert_eq!(text, "ok");
        let budgets: Vec<u32> = backend.recorded().iter().map(|r| r.max_tokens).collect();
        assert_eq!(budgets, vec![100, 150, 200, 250]);
    }

    #[tokio::test]
    async fn test_always_empty_returns_sentinel_after_four_attempts() {
        let backend = Arc::new(ScriptedBackend::texts(&[]));
        let client = client_for(backend.clone());

        let text = client.complete(AgentRole::Agent3, prompt(), 0.5, 80).await.unwrap();

        assert_eq!(text, exhausted_message(4));
        assert_eq!(backend.recorded().len(), 4);
    }

    #[tokio::test]
    async fn test_backend_errors_are_retried() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(BackendError::Connection("reset".into())),
            Ok("recovered".to_string()),
        ]));
        let client = client_for(backend.clone());

        let text = client.complete(AgentRole::Agent1, prompt(), 0.5, 100).await.unwrap();

        assert_eq!(text, "recovered");
        assert_eq!(backend.recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_persistent_errors_return_descriptive_text() {
        let backend = Arc::new(
            ScriptedBackend::new(vec![])
                .with_fallback(Err(BackendError::Connection("refused".into()))),
        );
        let client = client_for(backend.clone());

        let text = client.complete(AgentRole::Agent1, prompt(), 0.5, 100).await.unwrap();

        assert!(text.starts_with("Error: agent1 (model-1) failed after 4 attempts"));
        assert!(text.contains("refused"));
        assert_eq!(backend.recorded().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_role_fails_fast() {
        let backend = Arc::new(ScriptedBackend::texts(&["unused"]));
        let profiles = ProfileTable::new()
            .with_profile(AgentRole::Agent1, ModelProfile::new("mock", "model-1"));
        let client = CompletionClient::new(backend.clone(), profiles);

        let err = client
            .complete(AgentRole::Agent3, prompt(), 0.5, 100)
            .await
            .unwrap_err();

        assert_eq!(err, CompletionError::UnknownRole(AgentRole::Agent3));
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_profile_and_sampling() {
        let backend = Arc::new(ScriptedBackend::texts(&["ok"]));
        let client = client_for(backend.clone());

        client.complete(AgentRole::Agent2, prompt(), 0.4, 90).await.unwrap();

        let request = &backend.recorded()[0];
        assert_eq!(request.model, "model-2");
        assert_eq!(request.backend, "mock");
        assert_eq!(request.temperature, 0.4);
        assert_eq!(request.max_tokens, 90);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out() {
        struct Stalled;

        #[async_trait]
        impl CompletionBackend for Stalled {
            async fn complete(&self, _: &CompletionRequest) -> Result<String, BackendError> {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Ok("too late".to_string())
            }
        }

        let client = CompletionClient::new(Arc::new(Stalled), test_profiles()).with_retry_policy(
            RetryPolicy::immediate()
                .with_token_boosts(vec![0])
                .with_request_timeout(std::time::Duration::from_secs(1)),
        );

        let text = client.complete(AgentRole::Agent1, prompt(), 0.5, 100).await.unwrap();

        assert!(text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_check_connection() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok("hello".to_string()),
            Err(BackendError::Unauthorized("bad key".into())),
        ]));
        let client = client_for(backend);

        assert!(client.check_connection(AgentRole::Agent1).await);
        assert!(!client.check_connection(AgentRole::Agent1).await);
    }

    #[tokio::test]
    async fn test_check_connection_rejects_blank_reply() {
        let backend = Arc::new(ScriptedBackend::texts(&["   "]));
        let client = client_for(backend.clone());

        assert!(!client.check_connection(AgentRole::Agent1).await);
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_check_connection_uses_profile_sampling() {
        let backend = Arc::new(ScriptedBackend::texts(&["pong"]));
        let profiles = test_profiles().with_profile(
            AgentRole::Agent2,
            ModelProfile::new("mock", "model-2")
                .with_temperature(0.2)
                .with_max_tokens(16),
        );
        let client = CompletionClient::new(backend.clone(), profiles);

        assert!(client.check_connection(AgentRole::Agent2).await);
        let request = &backend.recorded()[0];
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 16);
    }

    #[tokio::test]
    async fn test_complete_with_defaults_uses_profile_budget() {
        let backend = Arc::new(ScriptedBackend::texts(&["", "done"]));
        let profiles = test_profiles().with_profile(
            AgentRole::Agent3,
            ModelProfile::new("mock", "model-3")
                .with_temperature(0.3)
                .with_max_tokens(120),
        );
        let client = CompletionClient::new(backend.clone(), profiles)
            .with_retry_policy(RetryPolicy::immediate());

        let text = client
            .complete_with_defaults(AgentRole::Agent3, prompt())
            .await
            .unwrap();

        assert_eq!(text, "done");
        let budgets: Vec<u32> = backend.recorded().iter().map(|r| r.max_tokens).collect();
        assert_eq!(budgets, vec![120, 170]);
        assert!(backend.recorded().iter().all(|r| r.temperature == 0.3));
    }
}
