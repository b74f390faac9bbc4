//! Intent classifier
//!
//! Maps a query (plus optional context) to one of the three collaboration
//! modes with a single backend call. This is the one place the fallback
//! policy lives: any transport failure, empty reply or unknown label
//! resolves to [`CollaborationMode::Independent`].

use crate::ports::completion_backend::{CompletionBackend, CompletionRequest};
use chorus_domain::{
    ClassificationDetail, Classification, ClassifierPrompt, CollaborationMode, ModelProfile,
    parse_classification_detail,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default sampling temperature for classification calls
pub const CLASSIFIER_TEMPERATURE: f32 = 0.0;
/// Default token budget for the one-word label
pub const CLASSIFIER_MAX_TOKENS: u32 = 10;
/// Token budget for the MODE/CONFIDENCE/REASONING form
const DETAILED_MAX_TOKENS: u32 = 100;

/// Single-shot mode classifier
///
/// Uses its own profile; the temperature and token budget of that profile
/// apply to [`Self::classify`].
pub struct IntentClassifier {
    backend: Arc<dyn CompletionBackend>,
    profile: ModelProfile,
    timeout: Duration,
}

impl IntentClassifier {
    pub fn new(backend: Arc<dyn CompletionBackend>, profile: ModelProfile) -> Self {
        Self {
            backend,
            profile,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    async fn call(&self, request: CompletionRequest) -> Result<String, String> {
        match tokio::time::timeout(self.timeout, self.backend.complete(&request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("timed out after {}s", self.timeout.as_secs())),
        }
    }

    /// Classify `query`; never fails.
    pub async fn classify(&self, query: &str, context: &str) -> Classification {
        let request = CompletionRequest::new(
            &self.profile,
            ClassifierPrompt::classify(query, context),
            self.profile.temperature,
            self.profile.max_tokens,
        );

        let raw = match self.call(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Classification failed: {}. Defaulting to independent", e);
                return Classification::fallback(e);
            }
        };

        let label = raw.trim().to_lowercase();
        if label.is_empty() {
            warn!("Classifier returned empty output. Defaulting to independent");
            return Classification::fallback("empty output");
        }

        match label.parse::<CollaborationMode>() {
            Ok(mode) => {
                info!("Classified query as {}", mode);
                Classification::classified(mode)
            }
            Err(_) => {
                warn!(
                    "Invalid classification '{}'. Defaulting to independent",
                    label
                );
                Classification::fallback(format!("invalid label '{}'", label))
            }
        }
    }

    /// Classify with a self-reported confidence and reasoning.
    ///
    /// Used for diagnostics; the orchestrator only needs [`Self::classify`].
    pub async fn classify_detailed(&self, query: &str) -> ClassificationDetail {
        let request = CompletionRequest::new(
            &self.profile,
            ClassifierPrompt::classify_detailed(query),
            self.profile.temperature,
            DETAILED_MAX_TOKENS,
        );

        match self.call(request).await {
            Ok(raw) => {
                debug!("Detailed classification response: {}", raw.trim());
                parse_classification_detail(&raw)
            }
            Err(e) => {
                warn!("Detailed classification failed: {}", e);
                ClassificationDetail::new(
                    CollaborationMode::Independent,
                    0.5,
                    "Error occurred, using default",
                )
            }
        }
    }
}
