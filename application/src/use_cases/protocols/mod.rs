//! Collaboration protocols
//!
//! Each protocol turns a query and its context into an ordered sequence of
//! [`Turn`]s. Dispatch from a [`CollaborationMode`] is an exhaustive match
//! in [`protocol_for`], so a new mode cannot be added without a protocol.

mod independent;
mod opposition;
mod support;

pub use independent::IndependentProtocol;
pub use opposition::OppositionProtocol;
pub use support::SupportProtocol;

use crate::ports::progress::ProgressNotifier;
use crate::services::completion_client::{CompletionClient, CompletionError};
use async_trait::async_trait;
use chorus_domain::{CollaborationMode, Turn};

/// Everything a protocol needs for one run
pub struct ProtocolInput<'a> {
    pub client: &'a CompletionClient,
    pub query: &'a str,
    /// Flattened conversation history (may be empty)
    pub context: &'a str,
    pub progress: &'a dyn ProgressNotifier,
}

impl<'a> ProtocolInput<'a> {
    pub fn new(
        client: &'a CompletionClient,
        query: &'a str,
        context: &'a str,
        progress: &'a dyn ProgressNotifier,
    ) -> Self {
        Self {
            client,
            query,
            context,
            progress,
        }
    }

    /// Append a turn to `turns` and report it
    fn push(&self, turns: &mut Vec<Turn>, turn: Turn) {
        self.progress.on_turn_complete(&turn);
        turns.push(turn);
    }
}

/// A strategy for producing the turns of one collaboration mode
#[async_trait]
pub trait CollaborationProtocol: Send + Sync {
    fn mode(&self) -> CollaborationMode;

    /// Produce the protocol's turns in causal order.
    ///
    /// Only configuration errors are returned; degraded generations are
    /// carried as turn text.
    async fn run(&self, input: &ProtocolInput<'_>) -> Result<Vec<Turn>, CompletionError>;
}

/// Protocol implementing `mode`
pub fn protocol_for(mode: CollaborationMode, max_rounds: u32) -> Box<dyn CollaborationProtocol> {
    match mode {
        CollaborationMode::Independent => Box::new(IndependentProtocol),
        CollaborationMode::Support => Box::new(SupportProtocol),
        CollaborationMode::Opposition => Box::new(OppositionProtocol::new(max_rounds)),
    }
}
