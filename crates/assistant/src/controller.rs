//! Drives assistant requests against an editor session.
//!
//! At most one request is in flight; a second call while one is pending
//! returns [`AssistantError::Busy`]. The session lock is held only to read
//! the context and to apply the result, never across the network call. A
//! response that arrives after the session was reset is discarded as
//! [`AssistantError::Stale`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use storefront_editor::EditorSession;
use storefront_pipeline::{parse_response, parse_response_str, AiLayoutResponse};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::client::{AssistantClient, AssistantError, ChatRequest};

/// What the presentation layer shows about the assistant.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerState {
    pub is_processing: bool,
    pub last_response: Option<AiLayoutResponse>,
    pub last_error: Option<String>,
    pub applied_changes: Vec<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub reason: String,
    pub applied_changes: Vec<String>,
}

pub struct AssistantController {
    client: Arc<dyn AssistantClient>,
    in_flight: AtomicBool,
    state: StdMutex<ControllerState>,
}

/// A response together with the change lines it produced.
type Applied = (AiLayoutResponse, Vec<String>);

/// Clears the in-flight flag and `is_processing` when the request finishes,
/// however it ends (including a dropped future).
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a StdMutex<ControllerState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_processing = false;
        self.flag.store(false, Ordering::Release);
    }
}

impl AssistantController {
    pub fn new(client: Arc<dyn AssistantClient>) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            state: StdMutex::new(ControllerState::default()),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send `prompt` with the session's current context and apply the reply.
    pub async fn run(
        &self,
        session: &Mutex<EditorSession>,
        prompt: &str,
    ) -> Result<RunOutcome, AssistantError> {
        let _guard = self.begin()?;
        let result = self.round_trip(session, prompt).await;
        self.finish(result)
    }

    /// Apply a raw response without the network round trip.
    pub async fn process_response(
        &self,
        session: &Mutex<EditorSession>,
        raw: Value,
    ) -> Result<RunOutcome, AssistantError> {
        let _guard = self.begin()?;
        let result = match parse_response(raw) {
            Ok(response) => Ok(apply_now(session, response).await),
            Err(e) => Err(e.into()),
        };
        self.finish(result)
    }

    /// Same as [`process_response`](Self::process_response) for a JSON string.
    pub async fn process_response_str(
        &self,
        session: &Mutex<EditorSession>,
        raw: &str,
    ) -> Result<RunOutcome, AssistantError> {
        let _guard = self.begin()?;
        let result = match parse_response_str(raw) {
            Ok(response) => Ok(apply_now(session, response).await),
            Err(e) => Err(e.into()),
        };
        self.finish(result)
    }

    /// Apply the canned demo response.
    pub async fn mock_response(
        &self,
        session: &Mutex<EditorSession>,
    ) -> Result<RunOutcome, AssistantError> {
        let _guard = self.begin()?;
        let result = Ok(apply_now(session, AiLayoutResponse::mock()).await);
        self.finish(result)
    }

    // ── Internals ─────────────────────────────────────────────

    fn begin(&self) -> Result<InFlight<'_>, AssistantError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Assistant request rejected: another is in flight");
            return Err(AssistantError::Busy);
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.is_processing = true;
        state.last_error = None;
        Ok(InFlight {
            flag: &self.in_flight,
            state: &self.state,
        })
    }

    async fn round_trip(
        &self,
        session: &Mutex<EditorSession>,
        prompt: &str,
    ) -> Result<Applied, AssistantError> {
        let (context, epoch) = {
            let session = session.lock().await;
            let context = session
                .assistant_context()
                .to_json_string()
                .map_err(|e| AssistantError::Parse(e.to_string()))?;
            (context, session.epoch())
        };

        info!(client = self.client.name(), "Sending prompt to assistant");
        let raw = self
            .client
            .chat(ChatRequest {
                prompt: prompt.to_string(),
                context,
            })
            .await?;
        let response = parse_response(raw)?;

        let mut session = session.lock().await;
        if session.epoch() != epoch {
            return Err(AssistantError::Stale);
        }
        let applied = session.apply_response(&response);
        Ok((response, applied))
    }

    fn finish(
        &self,
        result: Result<Applied, AssistantError>,
    ) -> Result<RunOutcome, AssistantError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.is_processing = false;
        match result {
            Ok((response, applied)) => {
                info!(reason = %response.reason, applied = ?applied, "Assistant changes applied");
                let outcome = RunOutcome {
                    reason: response.reason.clone(),
                    applied_changes: applied.clone(),
                };
                state.last_response = Some(response);
                state.last_error = None;
                state.applied_changes = applied;
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Assistant request failed");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

async fn apply_now(session: &Mutex<EditorSession>, response: AiLayoutResponse) -> Applied {
    let applied = session.lock().await.apply_response(&response);
    (response, applied)
}

#[cfg(test)]
mod tests;
