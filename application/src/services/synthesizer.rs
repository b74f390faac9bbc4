//! Consensus synthesizer
//!
//! Reduces the ordered transcript of a protocol run to one final answer.

use crate::services::completion_client::CompletionClient;
use chorus_domain::{AgentRole, PromptTemplate, Turn};
use std::sync::Arc;
use tracing::{info, warn};

/// Role that writes the consensus answer
pub const SYNTHESIS_ROLE: AgentRole = AgentRole::Agent3;
pub const SYNTHESIS_TEMPERATURE: f32 = 0.3;
pub const SYNTHESIS_MAX_TOKENS: u32 = 600;

pub struct ConsensusSynthesizer {
    client: Arc<CompletionClient>,
}

impl ConsensusSynthesizer {
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }

    /// Produce the final answer; failures become a fixed error string.
    pub async fn synthesize(&self, query: &str, turns: &[Turn], context: &str) -> String {
        let transcript: Vec<(String, String)> = turns
            .iter()
            .map(|t| (t.speaker().to_string(), t.text().to_string()))
            .collect();

        info!("Synthesizing consensus from {} turns", turns.len());
        let messages = PromptTemplate::synthesis(query, &transcript, context);

        match self
            .client
            .complete(
                SYNTHESIS_ROLE,
                messages,
                SYNTHESIS_TEMPERATURE,
                SYNTHESIS_MAX_TOKENS,
            )
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Synthesis failed: {}", e);
                format!("Error in synthesis: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::completion_client::tests::{ScriptedBackend, client_for};
    use chorus_domain::{CollaborationMode, ModelProfile, ProfileTable, TurnKind};

    fn transcript() -> Vec<Turn> {
        let mode = CollaborationMode::Support;
        vec![
            Turn::new(TurnKind::Lead, AgentRole::Agent1, mode, "Jet engines suck air in."),
            Turn::new(TurnKind::Supplement, AgentRole::Agent2, mode, "Then compress it."),
        ]
    }

    #[tokio::test]
    async fn test_prompt_contains_turns_in_order() {
        let backend = Arc::new(ScriptedBackend::texts(&["Consensus."]));
        let synthesizer = ConsensusSynthesizer::new(Arc::new(client_for(backend.clone())));

        let answer = synthesizer
            .synthesize("How do jet engines work?", &transcript(), "Asha: hi")
            .await;

        assert_eq!(answer, "Consensus.");
        let request = &backend.recorded()[0];
        assert_eq!(request.model, "model-3");
        assert_eq!(request.max_tokens, SYNTHESIS_MAX_TOKENS);
        let prompt = request.prompt_text();
        let lead = prompt.find("Lead (Agent 1): Jet engines suck air in.").unwrap();
        let supplement = prompt.find("Supplement (Agent 2): Then compress it.").unwrap();
        assert!(lead < supplement);
        assert!(prompt.contains("Asha: hi"));
    }

    #[tokio::test]
    async fn test_missing_profile_yields_error_text() {
        let backend = Arc::new(ScriptedBackend::texts(&["unused"]));
        let profiles = ProfileTable::new()
            .with_profile(AgentRole::Agent1, ModelProfile::new("mock", "model-1"));
        let synthesizer =
            ConsensusSynthesizer::new(Arc::new(CompletionClient::new(backend, profiles)));

        let answer = synthesizer.synthesize("q", &transcript(), "").await;

        assert!(answer.starts_with("Error in synthesis:"));
    }

    #[tokio::test]
    async fn test_exhaustion_still_yields_answer() {
        let backend = Arc::new(ScriptedBackend::texts(&[]));
        let synthesizer = ConsensusSynthesizer::new(Arc::new(client_for(backend)));

        let answer = synthesizer.synthesize("q", &transcript(), "").await;

        assert!(!answer.is_empty());
    }
}
