//! Session-level wiring of the editor.
//!
//! [`EditorSession`] owns the layout engine, the content store and the
//! persistence layer for one editing session and exposes the manual UI
//! action surface. Every mutation is persisted before the call returns.

pub mod content_store;
pub mod context;
pub mod inline_edit;
pub mod session;

pub use content_store::ContentStore;
pub use context::AssistantContext;
pub use inline_edit::{EditKey, EditOutcome, InlineEdit};
pub use session::EditorSession;
