//! Application-level configuration.
//!
//! - [`RetryPolicy`]: attempt budget, token boosts, backoff and per-call timeout
//! - [`OrchestrationParams`]: context window size and debate round limit

pub mod execution_params;

pub use execution_params::{DEFAULT_TOKEN_BOOSTS, OrchestrationParams, RetryPolicy};
