use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_pipeline::PipelineError;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    /// Serialized current-state summary.
    pub context: String,
}

/// Transport to the assistant service.
///
/// Implementations return the raw response body; validation happens in the
/// controller so every transport is held to the same contract.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<Value, AssistantError>;

    /// Name for logging (e.g. "http", "mock").
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant request already in progress")]
    Busy,
    /// Non-2xx response. `message` is the body's `detail` when present,
    /// otherwise `HTTP <status>`.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid response format")]
    InvalidResponse,
    #[error("Invalid JSON: {0}")]
    Parse(String),
    #[error("Editor was reset while the request was in flight")]
    Stale,
}

impl From<PipelineError> for AssistantError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidResponse => AssistantError::InvalidResponse,
            PipelineError::Parse(msg) => AssistantError::Parse(msg),
        }
    }
}

/// Mock assistant for exercising the controller without a service.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Returns queued results in order. An optional gate holds each call
    /// until the test releases it.
    pub struct MockAssistant {
        responses: Mutex<VecDeque<Result<Value, AssistantError>>>,
        requests: Mutex<Vec<ChatRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockAssistant {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        /// Calls wait on `gate` before answering.
        pub fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new()
            }
        }

        pub fn queue(&self, response: Value) {
            self.responses.lock().unwrap().push_back(Ok(response));
        }

        pub fn queue_error(&self, error: AssistantError) {
            self.responses.lock().unwrap().push_back(Err(error));
        }

        /// Every request received so far.
        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockAssistant {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl AssistantClient for MockAssistant {
        async fn chat(&self, request: ChatRequest) -> Result<Value, AssistantError> {
            self.requests.lock().unwrap().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(serde_json::json!({"reason": "no-op", "changes": []})))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }
}
