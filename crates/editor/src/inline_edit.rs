//! In-place editing of one content field.
//!
//! An edit opens on a field (only while edit mode is on), collects input
//! into a draft, and closes by commit or cancel. Enter commits single-line
//! fields; multi-line fields commit only on blur. Escape reverts the draft.
//! A commit whose draft equals the original writes nothing.

use storefront_core::{ContentSection, StorefrontError};
use tracing::debug;

use crate::content_store::ContentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Still editing.
    Open,
    /// The draft was written to the content store.
    Committed(String),
    /// Closed without a write: the draft matched the original.
    Unchanged,
    /// Closed by Escape; the draft was discarded.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct InlineEdit {
    section: ContentSection,
    field: String,
    original: String,
    draft: String,
    multiline: bool,
    open: bool,
}

impl InlineEdit {
    pub fn begin(
        store: &ContentStore,
        section: ContentSection,
        field: &str,
    ) -> Result<Self, StorefrontError> {
        if !store.edit_mode() {
            return Err(StorefrontError::EditModeDisabled);
        }
        let original = store
            .content()
            .field(section, field)
            .ok_or_else(|| StorefrontError::UnknownField {
                section: section.to_string(),
                field: field.to_string(),
            })?
            .to_string();

        Ok(Self {
            section,
            field: field.to_string(),
            draft: original.clone(),
            original,
            multiline: section.is_multiline(field),
            open: true,
        })
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Replace the draft. Ignored once the edit is closed.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.open {
            self.draft = text.into();
        }
    }

    pub fn press(&mut self, key: EditKey, store: &mut ContentStore) -> EditOutcome {
        if !self.open {
            return EditOutcome::Unchanged;
        }
        match key {
            EditKey::Enter if self.multiline => EditOutcome::Open,
            EditKey::Enter => self.commit(store),
            EditKey::Escape => {
                self.draft = self.original.clone();
                self.open = false;
                EditOutcome::Cancelled
            }
        }
    }

    /// Focus left the field: commit if the draft changed.
    pub fn blur(&mut self, store: &mut ContentStore) -> EditOutcome {
        if !self.open {
            return EditOutcome::Unchanged;
        }
        self.commit(store)
    }

    fn commit(&mut self, store: &mut ContentStore) -> EditOutcome {
        self.open = false;
        if self.draft == self.original {
            return EditOutcome::Unchanged;
        }
        match store.update_field(self.section, &self.field, self.draft.clone()) {
            Ok(()) => EditOutcome::Committed(self.draft.clone()),
            Err(e) => {
                debug!(error = %e, "Inline edit commit rejected");
                EditOutcome::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ContentState;
    use storefront_storage::Reconciler;

    fn store() -> ContentStore {
        let mut store = ContentStore::open(Reconciler::in_memory());
        store.set_edit_mode(true);
        store
    }

    #[test]
    fn begin_requires_edit_mode() {
        let mut store = store();
        store.set_edit_mode(false);
        assert!(matches!(
            InlineEdit::begin(&store, ContentSection::Hero, "heading"),
            Err(StorefrontError::EditModeDisabled)
        ));
    }

    #[test]
    fn begin_rejects_unknown_field() {
        let store = store();
        assert!(InlineEdit::begin(&store, ContentSection::Hero, "subtitle").is_err());
    }

    #[test]
    fn enter_commits_single_line_field() {
        let mut store = store();
        let mut edit = InlineEdit::begin(&store, ContentSection::Hero, "heading").unwrap();
        edit.input("Summer Sale");

        assert_eq!(
            edit.press(EditKey::Enter, &mut store),
            EditOutcome::Committed("Summer Sale".into())
        );
        assert!(!edit.is_open());
        assert_eq!(
            store.content().field(ContentSection::Hero, "heading"),
            Some("Summer Sale")
        );
    }

    #[test]
    fn enter_does_not_commit_multiline_field() {
        let mut store = store();
        let mut edit = InlineEdit::begin(&store, ContentSection::Newsletter, "description").unwrap();
        assert!(edit.is_multiline());
        edit.input("Line one\nLine two");

        assert_eq!(edit.press(EditKey::Enter, &mut store), EditOutcome::Open);
        assert_eq!(store.content(), &ContentState::default());

        assert_eq!(
            edit.blur(&mut store),
            EditOutcome::Committed("Line one\nLine two".into())
        );
    }

    #[test]
    fn escape_reverts_without_writing() {
        let mut store = store();
        let mut edit = InlineEdit::begin(&store, ContentSection::FeaturedProducts, "label").unwrap();
        edit.input("Changed");

        assert_eq!(edit.press(EditKey::Escape, &mut store), EditOutcome::Cancelled);
        assert_eq!(edit.draft(), ContentState::default().featured_products.label);
        assert_eq!(store.content(), &ContentState::default());

        // Closed edits ignore further input.
        edit.input("Again");
        assert_eq!(edit.blur(&mut store), EditOutcome::Unchanged);
        assert_eq!(store.content(), &ContentState::default());
    }

    #[test]
    fn unchanged_draft_writes_nothing() {
        let reconciler = Reconciler::in_memory();
        let mut store = ContentStore::open(reconciler.clone());
        store.set_edit_mode(true);
        let mut edit = InlineEdit::begin(&store, ContentSection::Testimonials, "heading").unwrap();

        assert_eq!(edit.blur(&mut store), EditOutcome::Unchanged);
        assert!(reconciler
            .backend()
            .read(storefront_storage::keys::CONTENT_KEY)
            .unwrap()
            .is_none());
    }
}
