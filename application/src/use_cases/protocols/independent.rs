//! Independent protocol: three parallel perspectives

use super::{CollaborationProtocol, ProtocolInput};
use crate::services::completion_client::CompletionError;
use async_trait::async_trait;
use chorus_domain::{AgentRole, CollaborationMode, PromptTemplate, Turn, TurnKind};
use tracing::info;

/// `(temperature, max_tokens)` per role
fn sampling(role: AgentRole) -> (f32, u32) {
    match role {
        AgentRole::Agent1 => (0.6, 200),
        AgentRole::Agent2 => (0.7, 120),
        AgentRole::Agent3 => (0.7, 120),
    }
}

/// Asks every role the same query concurrently; no role sees another's reply
pub struct IndependentProtocol;

impl IndependentProtocol {
    async fn answer(input: &ProtocolInput<'_>, role: AgentRole) -> Result<String, CompletionError> {
        let (temperature, max_tokens) = sampling(role);
        input
            .client
            .complete(
                role,
                PromptTemplate::independent(role, input.query, input.context),
                temperature,
                max_tokens,
            )
            .await
    }
}

#[async_trait]
impl CollaborationProtocol for IndependentProtocol {
    fn mode(&self) -> CollaborationMode {
        CollaborationMode::Independent
    }

    async fn run(&self, input: &ProtocolInput<'_>) -> Result<Vec<Turn>, CompletionError> {
        info!("Running independent perspectives");

        let (first, second, third) = tokio::join!(
            Self::answer(input, AgentRole::Agent1),
            Self::answer(input, AgentRole::Agent2),
            Self::answer(input, AgentRole::Agent3),
        );

        // Assembled in role order regardless of completion order
        let mut turns = Vec::with_capacity(3);
        for (role, text) in AgentRole::ALL.into_iter().zip([first?, second?, third?]) {
            input.push(
                &mut turns,
                Turn::new(TurnKind::Answer, role, CollaborationMode::Independent, text),
            );
        }
        Ok(turns)
    }
}
