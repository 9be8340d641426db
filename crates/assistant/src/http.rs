use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use storefront_core::config::AssistantConfig;
use tracing::debug;

use crate::client::{AssistantClient, AssistantError, ChatRequest};

/// Assistant reached over HTTP at `{base_url}/chat`.
pub struct HttpAssistant {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssistant {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AssistantClient for HttpAssistant {
    async fn chat(&self, request: ChatRequest) -> Result<Value, AssistantError> {
        let url = format!("{}/chat", self.base_url);
        debug!("Assistant request to {}", url);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message: error_detail(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        serde_json::from_str(&body).map_err(|e| AssistantError::Parse(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Best-effort message from a JSON error body's `detail` field.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
