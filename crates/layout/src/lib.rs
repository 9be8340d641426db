pub mod engine;
pub mod event_log;

pub use engine::LayoutEngine;
pub use event_log::{EventLog, MAX_EVENTS};
