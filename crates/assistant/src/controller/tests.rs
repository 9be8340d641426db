//! Unit tests for the assistant controller.

use std::sync::Arc;

use serde_json::{json, Value};
use storefront_core::{ComponentId, ContentSection, LayoutMode};
use storefront_editor::EditorSession;
use storefront_storage::Reconciler;
use tokio::sync::{Mutex, Notify};

use super::AssistantController;
use crate::client::mock::MockAssistant;
use crate::client::AssistantError;

fn session() -> Arc<Mutex<EditorSession>> {
    Arc::new(Mutex::new(EditorSession::open(
        Reconciler::in_memory(),
        LayoutMode::Grid,
    )))
}

fn remove_footer() -> Value {
    json!({
        "reason": "Shorter page",
        "changes": [{"type": "remove", "component": "footer"}]
    })
}

#[tokio::test]
async fn test_run_sends_context_and_applies_reply() {
    let mock = Arc::new(MockAssistant::new());
    mock.queue(remove_footer());
    let controller = AssistantController::new(mock.clone());
    let session = session();

    let outcome = controller.run(&session, "hide the footer").await.unwrap();
    assert_eq!(outcome.applied_changes, vec!["Removed footer"]);
    assert_eq!(outcome.reason, "Shorter page");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt, "hide the footer");
    let context: Value = serde_json::from_str(&requests[0].context).unwrap();
    assert_eq!(context["theme"]["primaryColor"], json!("indigo"));

    let state = controller.state();
    assert!(!state.is_processing);
    assert!(state.last_error.is_none());
    assert_eq!(state.applied_changes, vec!["Removed footer"]);
    assert_eq!(state.last_response.unwrap().reason, "Shorter page");
    assert!(!session
        .lock()
        .await
        .layout()
        .state()
        .get(ComponentId::Footer)
        .unwrap()
        .visible);
}

#[tokio::test]
async fn test_invalid_reply_is_typed_and_not_applied() {
    let mock = Arc::new(MockAssistant::new());
    mock.queue(json!({"changes": [{"type": "remove", "component": "footer"}]}));
    let controller = AssistantController::new(mock);
    let session = session();

    let err = controller.run(&session, "x").await.unwrap_err();
    assert!(matches!(err, AssistantError::InvalidResponse));
    assert_eq!(
        controller.state().last_error.as_deref(),
        Some("Invalid response format")
    );
    assert!(session.lock().await.layout().hidden().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_recorded() {
    let mock = Arc::new(MockAssistant::new());
    mock.queue_error(AssistantError::Api {
        status: 503,
        message: "Model overloaded".into(),
    });
    let controller = AssistantController::new(mock);

    let err = controller.run(&session(), "x").await.unwrap_err();
    assert_eq!(err.to_string(), "Model overloaded");
    let state = controller.state();
    assert_eq!(state.last_error.as_deref(), Some("Model overloaded"));
    assert!(!state.is_processing);
    assert!(!controller.is_processing());
}

#[tokio::test]
async fn test_second_request_while_in_flight_is_busy() {
    let gate = Arc::new(Notify::new());
    let mock = Arc::new(MockAssistant::gated(gate.clone()));
    mock.queue(remove_footer());
    let controller = Arc::new(AssistantController::new(mock));
    let session = session();

    let first = {
        let controller = controller.clone();
        let session = session.clone();
        tokio::spawn(async move { controller.run(&session, "first").await })
    };
    while !controller.is_processing() {
        tokio::task::yield_now().await;
    }

    let second = controller.run(&session, "second").await;
    assert!(matches!(second, Err(AssistantError::Busy)));
    assert!(matches!(
        controller.mock_response(&session).await,
        Err(AssistantError::Busy)
    ));

    gate.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first.applied_changes, vec!["Removed footer"]);
    assert!(!controller.is_processing());
}

#[tokio::test]
async fn test_abandoned_request_clears_processing_state() {
    let gate = Arc::new(Notify::new());
    let mock = Arc::new(MockAssistant::gated(gate));
    let controller = Arc::new(AssistantController::new(mock));
    let session = session();

    let pending = {
        let controller = controller.clone();
        let session = session.clone();
        tokio::spawn(async move { controller.run(&session, "never answered").await })
    };
    while !controller.is_processing() {
        tokio::task::yield_now().await;
    }
    assert!(controller.state().is_processing);

    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());

    assert!(!controller.is_processing());
    assert!(!controller.state().is_processing);
    let outcome = controller.mock_response(&session).await.unwrap();
    assert!(!outcome.applied_changes.is_empty());
}

#[tokio::test]
async fn test_reply_after_reset_is_stale() {
    let gate = Arc::new(Notify::new());
    let mock = Arc::new(MockAssistant::gated(gate.clone()));
    mock.queue(remove_footer());
    let controller = Arc::new(AssistantController::new(mock));
    let session = session();

    let pending = {
        let controller = controller.clone();
        let session = session.clone();
        tokio::spawn(async move { controller.run(&session, "x").await })
    };
    while !controller.is_processing() {
        tokio::task::yield_now().await;
    }

    session.lock().await.reset_layout();
    gate.notify_one();

    let result = pending.await.unwrap();
    assert!(matches!(result, Err(AssistantError::Stale)));
    assert!(session.lock().await.layout().hidden().is_empty());
}

#[tokio::test]
async fn test_process_response_str() {
    let controller = AssistantController::new(Arc::new(MockAssistant::new()));
    let session = session();

    let outcome = controller
        .process_response_str(
            &session,
            r#"{"reason":"copy","changes":[{"type":"update_props","section":"newsletter","props":{"heading":"Join us"}}]}"#,
        )
        .await
        .unwrap();
    assert_eq!(outcome.applied_changes, vec!["Updated newsletter content"]);
    assert_eq!(
        session
            .lock()
            .await
            .content()
            .content()
            .field(ContentSection::Newsletter, "heading"),
        Some("Join us")
    );

    let err = controller
        .process_response_str(&session, "not json")
        .await
        .unwrap_err();
    assert!(matches!(err, AssistantError::Parse(_)));
}

#[tokio::test]
async fn test_mock_response_applies_demo_changes() {
    let controller = AssistantController::new(Arc::new(MockAssistant::new()));
    let session = session();

    let outcome = controller.mock_response(&session).await.unwrap();
    assert_eq!(
        outcome.applied_changes,
        vec!["Moved featured-products to top", "Changed theme to emerald"]
    );
    assert_eq!(session.lock().await.content().color_scheme().id, "emerald");
}
