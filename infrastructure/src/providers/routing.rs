//! Routes each completion request to the backend its profile names

use super::openai_compat::OpenAiCompatBackend;
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use chorus_application::ports::completion_backend::{
    BackendError, CompletionBackend, CompletionRequest,
};
use std::collections::{BTreeMap, HashMap};

/// Dispatches by [`CompletionRequest::backend`]
pub struct RoutingBackend {
    backends: HashMap<String, OpenAiCompatBackend>,
}

impl RoutingBackend {
    pub fn new(backends: impl IntoIterator<Item = OpenAiCompatBackend>) -> Self {
        Self {
            backends: backends
                .into_iter()
                .map(|b| (b.id().to_string(), b))
                .collect(),
        }
    }

    /// Build one adapter per `[backends.<id>]` entry
    pub fn from_config(
        config: &BTreeMap<String, FileBackendConfig>,
    ) -> Result<Self, BackendError> {
        let backends = config
            .iter()
            .map(|(id, backend)| OpenAiCompatBackend::from_config(id, backend))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(backends))
    }

    pub fn backend_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn resolve(&self, id: &str) -> Result<&OpenAiCompatBackend, BackendError> {
        self.backends
            .get(id)
            .ok_or_else(|| BackendError::UnknownBackend(id.to_string()))
    }
}

#[async_trait]
impl CompletionBackend for RoutingBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        self.resolve(&request.backend)?.complete(request).await
    }
}
