//! Durable snapshots of editor state.
//!
//! A [`SnapshotBackend`] is a plain string key-value store. The [`Reconciler`]
//! maps layout, content, color scheme and event log state onto it, migrating
//! snapshots written by older schema versions on load.

pub mod backend;
pub mod error;
pub mod keys;
pub mod migration;
pub mod reconciler;

pub use backend::{LocalBackend, MemoryBackend, SnapshotBackend};
pub use error::StorageError;
pub use reconciler::Reconciler;
