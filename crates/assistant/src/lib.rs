//! Client side of the assistant `POST /chat` contract.
//!
//! [`AssistantClient`] is the transport seam; [`HttpAssistant`] talks to the
//! real service. [`AssistantController`] runs one request at a time against
//! an [`storefront_editor::EditorSession`] and applies the validated result.

pub mod client;
pub mod controller;
pub mod http;

pub use client::{AssistantClient, AssistantError, ChatRequest};
pub use controller::{AssistantController, ControllerState, RunOutcome};
pub use http::HttpAssistant;
