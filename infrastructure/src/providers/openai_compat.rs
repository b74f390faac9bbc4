//! OpenAI-compatible completion backend.
//!
//! Works with Groq, OpenRouter, OpenAI, Ollama, vLLM and any endpoint that
//! exposes `POST {base_url}/chat/completions`.

use crate::config::FileBackendConfig;
use chorus_application::ports::completion_backend::{BackendError, CompletionRequest};
use chorus_domain::{ChatMessage, MessageRole};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One configured OpenAI-compatible endpoint
pub struct OpenAiCompatBackend {
    id: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    pub fn new(
        id: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        extra_headers: HeaderMap,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(extra_headers)
            .build()
            .map_err(|e| BackendError::Connection(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            id: id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Build from a `[backends.<id>]` entry
    pub fn from_config(id: &str, config: &FileBackendConfig) -> Result<Self, BackendError> {
        let headers = Self::header_map(&config.extra_headers)?;
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            debug!(backend = %id, "No API key configured");
        }
        Self::new(
            id,
            config.base_url.clone(),
            api_key,
            headers,
            Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        )
    }

    fn header_map<'a>(
        headers: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<HeaderMap, BackendError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| BackendError::Connection(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| BackendError::Connection(format!("invalid header value: {e}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one chat completion request
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let body = ApiRequest::from_request(request);
        debug!(backend = %self.id, model = %request.model, max_tokens = request.max_tokens, "Sending completion request");

        let mut builder = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Connection(format!("{}: request timed out", self.id))
            } else {
                BackendError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Err(BackendError::Unauthorized(format!(
                "{} rejected the API key (HTTP {})",
                self.id, status
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        if !is_success(status) {
            warn!(backend = %self.id, status, "Backend returned error");
            return Err(BackendError::Status { status, body: text });
        }

        parse_completion(&text)
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

impl<'a> ApiRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: request.messages.iter().map(api_message).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

fn api_message(message: &ChatMessage) -> ApiMessage<'_> {
    ApiMessage {
        role: match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        },
        content: &message.content,
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Extract the first choice's text; `null` content is an empty reply.
pub fn parse_completion(body: &str) -> Result<String, BackendError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::InvalidResponse(format!("failed to parse response: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::InvalidResponse("no choices in response".into()))?;

    Ok(choice.message.content.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::ModelProfile;

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}},{"message":{"content":"other"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "hello");
    }

    #[test]
    fn test_null_content_is_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "");
    }

    #[test]
    fn test_no_choices_is_invalid() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(BackendError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_completion("not json"),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_any_2xx_is_success() {
        assert!(is_success(200));
        assert!(is_success(201));
        assert!(is_success(299));
        assert!(!is_success(199));
        assert!(!is_success(300));
        assert!(!is_success(429));
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest::new(
            &ModelProfile::new("groq", "llama"),
            vec![ChatMessage::system("rules"), ChatMessage::user("hi")],
            0.3,
            110,
        );
        let body = serde_json::to_value(ApiRequest::from_request(&request)).unwrap();
        assert_eq!(body["model"], "llama");
        assert_eq!(body["max_tokens"], 110);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = OpenAiCompatBackend::new(
            "local",
            "http://localhost:11434/v1/",
            None,
            HeaderMap::new(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = FileBackendConfig::new("http://x", "UNUSED")
            .with_header("bad header", "v");
        assert!(OpenAiCompatBackend::from_config("x", &config).is_err());
    }
}
