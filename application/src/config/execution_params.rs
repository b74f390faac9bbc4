//! Execution parameters: retry and round control
//!
//! [`RetryPolicy`] governs the completion client's attempt budget;
//! [`OrchestrationParams`] bounds the context window and debate length.
//! These are application-layer concerns, not domain policy.

use chorus_domain::{DEFAULT_HISTORY_LIMIT, MAX_DEBATE_ROUNDS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default token boosts; the number of entries is the attempt budget.
pub const DEFAULT_TOKEN_BOOSTS: [u32; 4] = [0, 50, 100, 150];

/// Retry policy for a single completion call.
///
/// Attempt `n` (zero-based) requests `max_tokens + token_boosts[n]` so a
/// reply truncated to nothing gets more room on the next try. Between
/// attempts the client waits `backoff * n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Extra tokens per attempt; the length is the attempt budget.
    pub token_boosts: Vec<u32>,
    /// Linear backoff unit between attempts.
    pub backoff: Duration,
    /// Upper bound for one backend request.
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            token_boosts: DEFAULT_TOKEN_BOOSTS.to_vec(),
            backoff: Duration::from_millis(250),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Number of attempts per call (never less than one)
    pub fn max_attempts(&self) -> usize {
        self.token_boosts.len().max(1)
    }

    /// Token boost for a zero-based attempt index
    pub fn boost(&self, attempt: usize) -> u32 {
        self.token_boosts.get(attempt).copied().unwrap_or(0)
    }

    /// Delay before a zero-based attempt index
    pub fn delay_before(&self, attempt: usize) -> Duration {
        self.backoff * attempt as u32
    }

    // ==================== Builder Methods ====================

    pub fn with_token_boosts(mut self, boosts: Vec<u32>) -> Self {
        self.token_boosts = boosts;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Policy without delays, for tests and tight loops
    pub fn immediate() -> Self {
        Self::default().with_backoff(Duration::ZERO)
    }
}

/// Bounds on a single orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationParams {
    /// Trailing history entries included in the context window
    /// (at most [`DEFAULT_HISTORY_LIMIT`]).
    pub history_limit: usize,
    /// Maximum debate rounds (clamped to the protocol's hard limit).
    pub max_rounds: u32,
}

impl Default for OrchestrationParams {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_rounds: MAX_DEBATE_ROUNDS,
        }
    }
}

impl OrchestrationParams {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.min(DEFAULT_HISTORY_LIMIT);
        self
    }

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds.clamp(1, MAX_DEBATE_ROUNDS);
        self
    }
}
