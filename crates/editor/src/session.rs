//! One editing session: layout, content, theme and their persistence.
//!
//! The session is the single writer. Each action mutates in-memory state,
//! then writes the affected snapshots before returning. A failed write is
//! logged and the in-memory change stands.

use storefront_core::{
    ActionEvent, ComponentId, ContentSection, LayoutMode, SizePreset, StorefrontError,
    ThemePreferences,
};
use storefront_layout::{EventLog, LayoutEngine};
use storefront_pipeline::{AiLayoutResponse, ChangePipeline, EditorSnapshot, PipelineResult};
use storefront_storage::Reconciler;
use tracing::{error, info};

use crate::content_store::ContentStore;
use crate::context::AssistantContext;
use crate::inline_edit::InlineEdit;

pub struct EditorSession {
    layout: LayoutEngine,
    content: ContentStore,
    preferences: ThemePreferences,
    reconciler: Reconciler,
    /// Bumped by resets; lets callers detect work started before one.
    epoch: u64,
}

impl EditorSession {
    /// Load every snapshot for `mode` from `reconciler`.
    pub fn open(reconciler: Reconciler, mode: LayoutMode) -> Self {
        let state = reconciler.load_layout(mode);
        let events = EventLog::from_events(reconciler.load_events());
        let content = ContentStore::open(reconciler.clone());
        info!(
            mode = %mode,
            components = state.components.len(),
            events = events.len(),
            scheme = content.color_scheme().id,
            "Editor session opened"
        );
        Self {
            layout: LayoutEngine::new(mode, state, events),
            content,
            preferences: ThemePreferences::default(),
            reconciler,
            epoch: 0,
        }
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentStore {
        &mut self.content
    }

    pub fn preferences(&self) -> ThemePreferences {
        self.preferences
    }

    pub fn events(&self) -> Vec<ActionEvent> {
        self.layout.events().events()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ── Layout actions ────────────────────────────────────────

    pub fn drag(&mut self, dragged: ComponentId, target: ComponentId) -> bool {
        let changed = self.layout.drag(dragged, target);
        self.persist_layout_if(changed)
    }

    pub fn swap(&mut self, dragged: ComponentId, target: ComponentId) -> bool {
        let changed = self.layout.swap(dragged, target);
        self.persist_layout_if(changed)
    }

    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        let changed = self.layout.reorder(old_index, new_index);
        self.persist_layout_if(changed)
    }

    pub fn move_component(&mut self, id: ComponentId, column: u32, row: u32) -> bool {
        let changed = self.layout.move_component(id, column, row);
        self.persist_layout_if(changed)
    }

    pub fn resize(&mut self, id: ComponentId, column_span: i64, row_span: Option<u32>) -> bool {
        let changed = self.layout.resize(id, column_span, row_span);
        self.persist_layout_if(changed)
    }

    /// Resize from the picker presets (4/6/8/12 columns, one row).
    pub fn resize_preset(&mut self, id: ComponentId, preset: SizePreset) -> bool {
        self.resize(
            id,
            i64::from(preset.column_span()),
            Some(preset.row_span()),
        )
    }

    pub fn remove(&mut self, id: ComponentId) -> bool {
        let changed = self.layout.remove(id);
        self.persist_layout_if(changed)
    }

    pub fn restore(&mut self, id: ComponentId) -> bool {
        let changed = self.layout.restore(id);
        self.persist_layout_if(changed)
    }

    /// Hidden components with their labels, for a restore menu.
    pub fn restorable(&self) -> Vec<(ComponentId, &'static str)> {
        self.layout
            .hidden()
            .into_iter()
            .map(|c| (c.id, c.id.label()))
            .collect()
    }

    /// Default arrangement, empty event log, persisted snapshots removed.
    pub fn reset_layout(&mut self) {
        let mode = self.layout.mode();
        self.layout.reset();
        if let Err(e) = self.reconciler.clear_layout(mode) {
            error!(error = %e, "Failed to clear layout snapshot");
        }
        if let Err(e) = self.reconciler.clear_events() {
            error!(error = %e, "Failed to clear event log snapshot");
        }
        self.epoch += 1;
        info!(mode = %mode, "Layout reset to defaults");
    }

    // ── Content actions ───────────────────────────────────────

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.content.toggle_edit_mode()
    }

    pub fn update_field(
        &mut self,
        section: ContentSection,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        self.content.update_field(section, field, value)
    }

    /// Open an inline edit on one field; requires edit mode.
    pub fn begin_edit(
        &self,
        section: ContentSection,
        field: &str,
    ) -> Result<InlineEdit, StorefrontError> {
        InlineEdit::begin(&self.content, section, field)
    }

    pub fn reset_content(&mut self) {
        self.content.reset_content();
        self.epoch += 1;
    }

    pub fn set_color_scheme(&mut self, id: &str) -> Result<(), StorefrontError> {
        self.content.set_color_scheme_by_id(id)
    }

    // ── Change lists ──────────────────────────────────────────

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            layout: self.layout.state().clone(),
            content: self.content.content().clone(),
            color_scheme: self.content.color_scheme(),
            preferences: self.preferences,
        }
    }

    pub fn pipeline(&self) -> ChangePipeline {
        ChangePipeline::new(self.layout.mode())
    }

    /// Run a validated change list against the current state and adopt the
    /// result. Returns the applied-change lines.
    pub fn apply_response(&mut self, response: &AiLayoutResponse) -> Vec<String> {
        let result = self.pipeline().apply(&self.snapshot(), response);
        self.apply_result(result)
    }

    /// Adopt a pipeline result and persist whatever it changed. Change lists
    /// do not record layout events.
    pub fn apply_result(&mut self, result: PipelineResult) -> Vec<String> {
        let PipelineResult {
            snapshot,
            applied_changes,
        } = result;

        if &snapshot.layout != self.layout.state() {
            self.layout.replace_state(snapshot.layout);
            self.persist_layout();
        }
        self.content.replace_content(snapshot.content);
        if snapshot.color_scheme.id != self.content.color_scheme().id {
            self.content.set_color_scheme(snapshot.color_scheme);
        }
        self.preferences = snapshot.preferences;

        applied_changes
    }

    pub fn assistant_context(&self) -> AssistantContext {
        AssistantContext::build(
            self.layout.state(),
            self.content.content(),
            self.content.color_scheme(),
            self.preferences,
        )
    }

    // ── Persistence ───────────────────────────────────────────

    fn persist_layout_if(&self, changed: bool) -> bool {
        if changed {
            self.persist_layout();
            self.persist_events();
        }
        changed
    }

    fn persist_layout(&self) {
        if let Err(e) = self
            .reconciler
            .save_layout(self.layout.mode(), self.layout.state())
        {
            error!(error = %e, "Failed to save layout");
        }
    }

    fn persist_events(&self) {
        if let Err(e) = self.reconciler.save_events(&self.events()) {
            error!(error = %e, "Failed to save event log");
        }
    }
}

#[cfg(test)]
mod tests;
