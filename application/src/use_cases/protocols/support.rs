//! Support protocol: sequential enrichment
//!
//! Lead → Supplement (sees Lead) → Final (sees Lead and Supplement).

use super::{CollaborationProtocol, ProtocolInput};
use crate::services::completion_client::CompletionError;
use async_trait::async_trait;
use chorus_domain::{AgentRole, CollaborationMode, PromptTemplate, Turn, TurnKind};
use tracing::info;

const MODE: CollaborationMode = CollaborationMode::Support;

pub struct SupportProtocol;

#[async_trait]
impl CollaborationProtocol for SupportProtocol {
    fn mode(&self) -> CollaborationMode {
        MODE
    }

    async fn run(&self, input: &ProtocolInput<'_>) -> Result<Vec<Turn>, CompletionError> {
        let ProtocolInput {
            client,
            query,
            context,
            ..
        } = *input;
        let mut turns = Vec::with_capacity(3);

        info!("Support: lead");
        let lead = client
            .complete(
                AgentRole::Agent1,
                PromptTemplate::support_lead(query, context),
                0.6,
                120,
            )
            .await?;
        input.push(&mut turns, Turn::new(TurnKind::Lead, AgentRole::Agent1, MODE, lead.clone()));

        info!("Support: supplement");
        let supplement = client
            .complete(
                AgentRole::Agent2,
                PromptTemplate::support_supplement(query, &lead, context),
                0.7,
                100,
            )
            .await?;
        input.push(
            &mut turns,
            Turn::new(TurnKind::Supplement, AgentRole::Agent2, MODE, supplement.clone()),
        );

        info!("Support: final");
        let previous = format!("{}\n{}", lead, supplement);
        let last = client
            .complete(
                AgentRole::Agent3,
                PromptTemplate::support_final(query, &previous, context),
                0.7,
                80,
            )
            .await?;
        input.push(&mut turns, Turn::new(TurnKind::Final, AgentRole::Agent3, MODE, last));

        Ok(turns)
    }
}
