//! Editable copy and the active color scheme.

use storefront_core::{ColorScheme, ContentSection, ContentState, StorefrontError};
use storefront_storage::Reconciler;
use tracing::{error, info};

pub struct ContentStore {
    content: ContentState,
    color_scheme: &'static ColorScheme,
    /// Session-local; never persisted.
    edit_mode: bool,
    reconciler: Reconciler,
}

impl ContentStore {
    /// Load content and color scheme from `reconciler`.
    pub fn open(reconciler: Reconciler) -> Self {
        let content = reconciler.load_content();
        let color_scheme = reconciler.load_color_scheme();
        Self {
            content,
            color_scheme,
            edit_mode: false,
            reconciler,
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn color_scheme(&self) -> &'static ColorScheme {
        self.color_scheme
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    /// Flip edit mode and return the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.edit_mode
    }

    /// Replace one field and persist.
    pub fn update_field(
        &mut self,
        section: ContentSection,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        self.content.set_field(section, field, value)?;
        self.persist_content();
        Ok(())
    }

    /// Adopt a whole content state (e.g. a change list result) and persist.
    pub fn replace_content(&mut self, content: ContentState) {
        if content != self.content {
            self.content = content;
            self.persist_content();
        }
    }

    /// Back to the compiled-in copy; the persisted snapshot is removed.
    pub fn reset_content(&mut self) {
        self.content = ContentState::default();
        if let Err(e) = self.reconciler.clear_content() {
            error!(error = %e, "Failed to clear content snapshot");
        }
        info!("Content reset to defaults");
    }

    /// Switch scheme wholesale and persist its id.
    pub fn set_color_scheme(&mut self, scheme: &'static ColorScheme) {
        self.color_scheme = scheme;
        if let Err(e) = self.reconciler.save_color_scheme(scheme) {
            error!(error = %e, "Failed to save color scheme");
        }
    }

    pub fn set_color_scheme_by_id(&mut self, id: &str) -> Result<(), StorefrontError> {
        let scheme = ColorScheme::find(id)
            .ok_or_else(|| StorefrontError::UnknownColorScheme(id.to_string()))?;
        self.set_color_scheme(scheme);
        Ok(())
    }

    fn persist_content(&self) {
        if let Err(e) = self.reconciler.save_content(&self.content) {
            error!(error = %e, "Failed to save content");
        }
    }
}
