//! Run Consensus use case
//!
//! The orchestrator façade: builds the context window from history,
//! resolves the collaboration mode (override or classifier), runs the
//! matching protocol and reduces its transcript to a final answer.

use crate::config::OrchestrationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::services::completion_client::{CompletionClient, CompletionError};
use crate::services::intent_classifier::IntentClassifier;
use crate::services::synthesizer::ConsensusSynthesizer;
use crate::use_cases::protocols::{ProtocolInput, protocol_for};
use chorus_domain::{
    AgentRole, Classification, CollaborationMode, DEFAULT_HISTORY_LIMIT, OrchestrationResult,
    Query, Stage,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during an orchestration run
///
/// Generation failures never show up here; they degrade into turn text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunConsensusError {
    #[error("Model profiles missing for: {}", format_roles(.0))]
    IncompleteProfiles(Vec<AgentRole>),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

fn format_roles(roles: &[AgentRole]) -> String {
    roles
        .iter()
        .map(AgentRole::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Input for the RunConsensus use case
#[derive(Debug, Clone)]
pub struct RunConsensusInput {
    pub query: Query,
    /// When set, classification is skipped
    pub mode_override: Option<CollaborationMode>,
}

impl RunConsensusInput {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            mode_override: None,
        }
    }

    pub fn with_mode(mut self, mode: Option<CollaborationMode>) -> Self {
        self.mode_override = mode;
        self
    }
}

/// Use case for running one query through the collaboration pipeline
pub struct RunConsensusUseCase {
    client: Arc<CompletionClient>,
    classifier: IntentClassifier,
    synthesizer: ConsensusSynthesizer,
    params: OrchestrationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunConsensusUseCase {
    /// Create the use case, checking that every role has a profile.
    pub fn new(
        client: Arc<CompletionClient>,
        classifier: IntentClassifier,
    ) -> Result<Self, RunConsensusError> {
        let missing = client.profiles().missing_roles();
        if !missing.is_empty() {
            return Err(RunConsensusError::IncompleteProfiles(missing));
        }

        Ok(Self {
            synthesizer: ConsensusSynthesizer::new(Arc::clone(&client)),
            client,
            classifier,
            params: OrchestrationParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        })
    }

    pub fn with_params(mut self, params: OrchestrationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn client(&self) -> &Arc<CompletionClient> {
        &self.client
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConsensusInput,
    ) -> Result<OrchestrationResult, RunConsensusError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<OrchestrationResult, RunConsensusError> {
        let query = input.query.text();
        let history_limit = self.params.history_limit.min(DEFAULT_HISTORY_LIMIT);
        let context = input.query.context_window(history_limit);
        info!(
            "Starting run ({} history entries, {} in context)",
            input.query.history().len(),
            input.query.history().len().min(history_limit)
        );

        // Stage 1: Mode resolution
        let classification = match input.mode_override {
            Some(mode) => {
                info!("Mode override: {}", mode);
                Classification::overridden(mode)
            }
            None => {
                progress.on_stage_start(&Stage::Classification);
                let classification = self.classifier.classify(query, &context).await;
                progress.on_stage_complete(&Stage::Classification);
                classification
            }
        };
        if let chorus_domain::ModeSource::Fallback(reason) = &classification.source {
            warn!("Classifier fallback ({}), using {}", reason, classification.mode);
        }
        progress.on_mode_resolved(&classification);
        self.conversation_logger
            .log(ConversationEvent::classification(query, &classification));
        let mode = classification.mode;

        // Stage 2: Protocol
        let stage = Stage::Protocol(mode);
        progress.on_stage_start(&stage);
        let protocol = protocol_for(mode, self.params.max_rounds);
        let protocol_input = ProtocolInput::new(&self.client, query, &context, progress);
        let turns = protocol.run(&protocol_input).await?;
        progress.on_stage_complete(&stage);
        for turn in &turns {
            self.conversation_logger.log(ConversationEvent::turn(turn));
        }
        info!("{} produced {} turns", mode, turns.len());

        // Stage 3: Synthesis
        progress.on_stage_start(&Stage::Synthesis);
        let final_answer = self.synthesizer.synthesize(query, &turns, &context).await;
        progress.on_stage_complete(&Stage::Synthesis);
        self.conversation_logger
            .log(ConversationEvent::synthesis(&final_answer, turns.len()));

        Ok(OrchestrationResult::new(mode, turns, final_answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::ports::completion_backend::{BackendError, CompletionBackend, CompletionRequest};
    use crate::services::completion_client::tests::{ScriptedBackend, test_profiles};
    use async_trait::async_trait;
    use chorus_domain::{ContextEntry, ModelProfile, ProfileTable, Turn, TurnKind};
    use std::sync::Mutex;

    fn use_case(backend: Arc<dyn CompletionBackend>) -> RunConsensusUseCase {
        let client = Arc::new(
            CompletionClient::new(Arc::clone(&backend), test_profiles())
                .with_retry_policy(RetryPolicy::immediate()),
        );
        let classifier = IntentClassifier::new(backend, ModelProfile::new("mock", "classifier"));
        RunConsensusUseCase::new(client, classifier).unwrap()
    }

    fn input(text: &str) -> RunConsensusInput {
        RunConsensusInput::new(Query::try_new(text).unwrap())
    }

    /// Backend that always fails
    struct Down;

    #[async_trait]
    impl CompletionBackend for Down {
        async fn complete(&self, _: &CompletionRequest) -> Result<String, BackendError> {
            Err(BackendError::Connection("unreachable".into()))
        }
    }

    #[tokio::test]
    async fn test_classified_support_run() {
        let backend = Arc::new(ScriptedBackend::texts(&[
            "support",
            "Air is sucked in.",
            "It is compressed and burned.",
            "Maintenance matters.",
            "Jet engines push air backwards.",
        ]));
        let use_case = use_case(backend.clone());

        let result = use_case
            .execute(input("Explain how a jet engine works"))
            .await
            .unwrap();

        assert_eq!(result.mode, CollaborationMode::Support);
        let kinds: Vec<TurnKind> = result.turns.iter().map(Turn::kind).collect();
        assert_eq!(kinds, vec![TurnKind::Lead, TurnKind::Supplement, TurnKind::Final]);
        assert_eq!(result.final_answer, "Jet engines push air backwards.");
        assert_eq!(backend.recorded()[0].model, "classifier");
    }

    #[tokio::test]
    async fn test_override_skips_classification() {
        let backend = Arc::new(
            ScriptedBackend::new(vec![]).with_fallback(Ok("answer".to_string())),
        );
        let use_case = use_case(backend.clone());

        let result = use_case
            .execute(input("Compare A and B").with_mode(Some(CollaborationMode::Opposition)))
            .await
            .unwrap();

        assert_eq!(result.mode, CollaborationMode::Opposition);
        assert!(backend.recorded().iter().all(|r| r.model != "classifier"));
    }

    #[tokio::test]
    async fn test_every_mode_answers_when_backend_is_down() {
        let use_case = use_case(Arc::new(Down));

        for mode in CollaborationMode::ALL {
            let result = use_case
                .execute(input("anything").with_mode(Some(mode)))
                .await
                .unwrap();
            assert!(!result.final_answer.is_empty());
            assert!(result.turns.iter().all(|t| !t.text().is_empty()));
        }

        let classified = use_case.execute(input("anything")).await.unwrap();
        assert_eq!(classified.mode, CollaborationMode::Independent);
        assert_eq!(classified.turns.len(), 3);
    }

    #[tokio::test]
    async fn test_context_window_threaded_through_stages() {
        let backend = Arc::new(
            ScriptedBackend::new(vec![Ok("independent".to_string())])
                .with_fallback(Ok("reply".to_string())),
        );
        let use_case = use_case(backend.clone());
        let history: Vec<ContextEntry> = (0..12)
            .map(|i| ContextEntry::new("user", format!("user{}", i), format!("message {}", i)))
            .collect();
        let query = Query::try_new("follow-up").unwrap().with_history(history);

        use_case.execute(RunConsensusInput::new(query)).await.unwrap();

        let requests = backend.recorded();
        assert_eq!(requests.len(), 5);
        for request in &requests {
            let prompt = request.prompt_text();
            assert!(prompt.contains("user11: message 11"));
            assert!(prompt.contains("user2: message 2"));
            assert!(!prompt.contains("user1: message 1\n"));
            assert!(!prompt.contains("message 0"));
        }
    }

    #[tokio::test]
    async fn test_oversized_history_limit_keeps_last_ten() {
        let backend = Arc::new(
            ScriptedBackend::new(vec![Ok("independent".to_string())])
                .with_fallback(Ok("reply".to_string())),
        );
        let use_case = use_case(backend.clone()).with_params(OrchestrationParams {
            history_limit: 50,
            ..OrchestrationParams::default()
        });
        let history: Vec<ContextEntry> = (0..30)
            .map(|i| ContextEntry::new("user", format!("user{}", i), format!("message {}", i)))
            .collect();
        let query = Query::try_new("follow-up").unwrap().with_history(history);

        use_case.execute(RunConsensusInput::new(query)).await.unwrap();

        let classifier_prompt = backend.recorded()[0].prompt_text();
        let in_context = (0..30)
            .filter(|i| classifier_prompt.contains(&format!("user{}: message {}", i, i)))
            .count();
        assert_eq!(in_context, 10);
        assert!(classifier_prompt.contains("user29: message 29"));
        assert!(!classifier_prompt.contains("user19: message 19"));
    }

    #[tokio::test]
    async fn test_incomplete_profiles_rejected() {
        let backend: Arc<dyn CompletionBackend> = Arc::new(Down);
        let profiles = ProfileTable::new()
            .with_profile(AgentRole::Agent1, ModelProfile::new("mock", "model-1"));
        let client = Arc::new(CompletionClient::new(Arc::clone(&backend), profiles));
        let classifier = IntentClassifier::new(backend, ModelProfile::new("mock", "c"));

        let err = RunConsensusUseCase::new(client, classifier).err().unwrap();

        assert_eq!(
            err,
            RunConsensusError::IncompleteProfiles(vec![AgentRole::Agent2, AgentRole::Agent3])
        );
        assert_eq!(err.to_string(), "Model profiles missing for: agent2, agent3");
    }

    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn test_conversation_events_in_order() {
        let backend = Arc::new(
            ScriptedBackend::new(vec![Ok("independent".to_string())])
                .with_fallback(Ok("reply".to_string())),
        );
        let logger = Arc::new(RecordingLogger(Mutex::new(Vec::new())));
        let use_case = use_case(backend).with_conversation_logger(logger.clone());

        use_case.execute(input("q")).await.unwrap();

        assert_eq!(
            *logger.0.lock().unwrap(),
            vec!["classification", "turn", "turn", "turn", "synthesis"]
        );
    }
}
