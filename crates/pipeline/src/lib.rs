//! Validation and application of structured change lists.
//!
//! A change list arrives as untrusted JSON (usually from the assistant).
//! [`parse_response`] checks its shape and turns it into typed
//! [`ChangeAction`]s; [`ChangePipeline::apply`] folds those over a snapshot
//! of the editor state and reports what changed. The pipeline never touches
//! storage: persisting the result is the caller's job.

pub mod action;
pub mod apply;
pub mod error;
pub mod validation;

pub use action::{AiLayoutResponse, ChangeAction, MoveEdge, MovePosition, ThemePatch, CHANGE_TYPES};
pub use apply::{ChangePipeline, EditorSnapshot, PipelineResult};
pub use error::PipelineError;
pub use validation::{parse_response, parse_response_str, validate};
