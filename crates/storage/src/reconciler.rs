//! Maps in-memory editor state onto durable snapshots.
//!
//! Loads never fail: an absent, unreadable or malformed snapshot is logged
//! and replaced by the compiled-in default. Saves and clears return errors so
//! the caller can decide whether to surface them.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{ActionEvent, ColorScheme, ContentState, LayoutMode, LayoutState};
use tracing::{debug, warn};

use crate::backend::{LocalBackend, MemoryBackend, SnapshotBackend};
use crate::error::StorageError;
use crate::keys::{layout_key, COLOR_SCHEME_KEY, CONTENT_KEY, EVENTS_KEY};
use crate::migration::migrate_layout;

/// Persisted color scheme selection.
#[derive(Debug, Serialize, Deserialize)]
struct SchemeSnapshot {
    id: String,
}

#[derive(Clone)]
pub struct Reconciler {
    backend: Arc<dyn SnapshotBackend>,
}

impl Reconciler {
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self { backend }
    }

    /// Reconciler over JSON files in `data_dir`.
    pub fn local(data_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(LocalBackend::new(data_dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn backend(&self) -> &Arc<dyn SnapshotBackend> {
        &self.backend
    }

    // ── Layout ────────────────────────────────────────────────

    /// Load the layout for `mode`, migrating older snapshots.
    pub fn load_layout(&self, mode: LayoutMode) -> LayoutState {
        let key = layout_key(mode);
        let Some(raw) = self.read_json(key) else {
            return LayoutState::default_arrangement();
        };
        match migrate_layout(raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(key, error = %e, "Discarding layout snapshot, using defaults");
                LayoutState::default_arrangement()
            }
        }
    }

    pub fn save_layout(&self, mode: LayoutMode, state: &LayoutState) -> Result<(), StorageError> {
        self.write_json(layout_key(mode), state)
    }

    pub fn clear_layout(&self, mode: LayoutMode) -> Result<(), StorageError> {
        self.backend.remove(layout_key(mode))
    }

    // ── Content ───────────────────────────────────────────────

    /// Load content; absent sections or fields fall back to defaults.
    pub fn load_content(&self) -> ContentState {
        self.load_typed(CONTENT_KEY).unwrap_or_default()
    }

    pub fn save_content(&self, content: &ContentState) -> Result<(), StorageError> {
        self.write_json(CONTENT_KEY, content)
    }

    pub fn clear_content(&self) -> Result<(), StorageError> {
        self.backend.remove(CONTENT_KEY)
    }

    // ── Color scheme ──────────────────────────────────────────

    /// Load the active scheme. An id missing from the catalog resolves to
    /// the first catalog entry.
    pub fn load_color_scheme(&self) -> &'static ColorScheme {
        match self.load_typed::<SchemeSnapshot>(COLOR_SCHEME_KEY) {
            Some(snapshot) => {
                if ColorScheme::find(&snapshot.id).is_none() {
                    warn!(id = %snapshot.id, "Unknown color scheme in snapshot");
                }
                ColorScheme::resolve(&snapshot.id)
            }
            None => ColorScheme::fallback(),
        }
    }

    pub fn save_color_scheme(&self, scheme: &ColorScheme) -> Result<(), StorageError> {
        self.write_json(
            COLOR_SCHEME_KEY,
            &SchemeSnapshot {
                id: scheme.id.to_string(),
            },
        )
    }

    // ── Event log ─────────────────────────────────────────────

    pub fn load_events(&self) -> Vec<ActionEvent> {
        self.load_typed(EVENTS_KEY).unwrap_or_default()
    }

    pub fn save_events(&self, events: &[ActionEvent]) -> Result<(), StorageError> {
        self.write_json(EVENTS_KEY, events)
    }

    pub fn clear_events(&self) -> Result<(), StorageError> {
        self.backend.remove(EVENTS_KEY)
    }

    // ── Helpers ───────────────────────────────────────────────

    fn read_json(&self, key: &str) -> Option<Value> {
        let text = match self.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key, "No snapshot");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read snapshot");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Snapshot is not valid JSON");
                None
            }
        }
    }

    fn load_typed<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_json(key)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed snapshot");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.backend.write(key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{ActionKind, ComponentId, ContentSection, COLOR_SCHEMES};

    use crate::keys::{LAYOUT_GRID_KEY, LAYOUT_LIST_KEY};

    #[test]
    fn empty_store_loads_defaults() {
        let reconciler = Reconciler::in_memory();
        assert_eq!(reconciler.load_layout(LayoutMode::Grid), LayoutState::default_arrangement());
        assert_eq!(reconciler.load_content(), ContentState::default());
        assert_eq!(reconciler.load_color_scheme().id, "indigo");
        assert!(reconciler.load_events().is_empty());
    }

    #[test]
    fn layout_round_trips_through_local_files() {
        let tmp = tempfile::tempdir().unwrap();
        let reconciler = Reconciler::local(tmp.path()).unwrap();

        let mut state = LayoutState::default_arrangement();
        state.get_mut(ComponentId::Footer).unwrap().visible = false;
        state.get_mut(ComponentId::Hero).unwrap().column_span = 6;
        reconciler.save_layout(LayoutMode::Grid, &state).unwrap();

        let reopened = Reconciler::local(tmp.path()).unwrap();
        assert_eq!(reopened.load_layout(LayoutMode::Grid), state);
    }

    #[test]
    fn layout_keys_are_not_cross_read() {
        let reconciler = Reconciler::in_memory();
        let mut state = LayoutState::default_arrangement();
        state.components.reverse();
        reconciler.save_layout(LayoutMode::List, &state).unwrap();

        assert_eq!(reconciler.load_layout(LayoutMode::List), state);
        assert_eq!(reconciler.load_layout(LayoutMode::Grid), LayoutState::default_arrangement());
        assert!(reconciler.backend().read(LAYOUT_GRID_KEY).unwrap().is_none());
        assert!(reconciler.backend().read(LAYOUT_LIST_KEY).unwrap().is_some());
    }

    #[test]
    fn corrupt_layout_falls_back_to_defaults() {
        let reconciler = Reconciler::in_memory();
        reconciler.backend().write(LAYOUT_GRID_KEY, "{not json").unwrap();
        assert_eq!(reconciler.load_layout(LayoutMode::Grid), LayoutState::default_arrangement());

        reconciler
            .backend()
            .write(LAYOUT_GRID_KEY, r#"{"components": "nope"}"#)
            .unwrap();
        assert_eq!(reconciler.load_layout(LayoutMode::Grid), LayoutState::default_arrangement());
    }

    #[test]
    fn partial_layout_loads_every_component() {
        let reconciler = Reconciler::in_memory();
        reconciler
            .backend()
            .write(LAYOUT_GRID_KEY, r#"{"components":[{"id":"hero","visible":true}]}"#)
            .unwrap();

        let state = reconciler.load_layout(LayoutMode::Grid);
        assert_eq!(state.components.len(), 5);
        for id in ComponentId::ALL {
            assert_eq!(state.components.iter().filter(|c| c.id == id).count(), 1);
        }
        assert_eq!(state.components[0].id, ComponentId::Hero);
    }

    #[test]
    fn clear_layout_forces_defaults() {
        let reconciler = Reconciler::in_memory();
        let mut state = LayoutState::default_arrangement();
        state.components.truncate(2);
        reconciler.save_layout(LayoutMode::Grid, &state).unwrap();
        reconciler.clear_layout(LayoutMode::Grid).unwrap();
        assert_eq!(reconciler.load_layout(LayoutMode::Grid), LayoutState::default_arrangement());
    }

    #[test]
    fn partial_content_fills_defaults() {
        let reconciler = Reconciler::in_memory();
        reconciler
            .backend()
            .write(CONTENT_KEY, r#"{"hero": {"heading": "Sale"}}"#)
            .unwrap();

        let content = reconciler.load_content();
        assert_eq!(content.field(ContentSection::Hero, "heading"), Some("Sale"));
        assert_eq!(
            content.field(ContentSection::Newsletter, "heading"),
            ContentState::default().field(ContentSection::Newsletter, "heading")
        );
    }

    #[test]
    fn content_round_trip_and_clear() {
        let reconciler = Reconciler::in_memory();
        let mut content = ContentState::default();
        content
            .set_field(ContentSection::Newsletter, "buttonText", "Join")
            .unwrap();
        reconciler.save_content(&content).unwrap();
        assert_eq!(reconciler.load_content(), content);

        reconciler.clear_content().unwrap();
        assert_eq!(reconciler.load_content(), ContentState::default());
    }

    #[test]
    fn color_scheme_is_stored_by_id() {
        let reconciler = Reconciler::in_memory();
        reconciler.save_color_scheme(&COLOR_SCHEMES[2]).unwrap();
        assert_eq!(
            reconciler.backend().read(COLOR_SCHEME_KEY).unwrap().as_deref(),
            Some(r#"{"id":"rose"}"#)
        );
        assert_eq!(reconciler.load_color_scheme().id, "rose");
    }

    #[test]
    fn unknown_color_scheme_resolves_to_first_entry() {
        let reconciler = Reconciler::in_memory();
        reconciler
            .backend()
            .write(COLOR_SCHEME_KEY, r#"{"id":"magenta"}"#)
            .unwrap();
        assert_eq!(reconciler.load_color_scheme().id, "indigo");
    }

    #[test]
    fn events_round_trip() {
        let reconciler = Reconciler::in_memory();
        let events = vec![
            ActionEvent::now(ActionKind::Remove, ComponentId::Footer),
            ActionEvent::now(ActionKind::Drag, ComponentId::Hero).with_indices(0, 3),
        ];
        reconciler.save_events(&events).unwrap();

        let loaded = reconciler.load_events();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].new_index, Some(3));
        assert_eq!(
            loaded[0].timestamp.timestamp_millis(),
            events[0].timestamp.timestamp_millis()
        );

        reconciler.clear_events().unwrap();
        assert!(reconciler.load_events().is_empty());
    }
}
