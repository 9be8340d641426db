//! Unit tests for the editor session.

use serde_json::json;
use storefront_core::{
    ActionKind, ComponentId, ContentSection, ContentState, LayoutMode, LayoutState, SizePreset,
    CANONICAL_SLOTS,
};
use storefront_pipeline::{parse_response, AiLayoutResponse};
use storefront_storage::{keys, Reconciler};

use super::EditorSession;
use crate::inline_edit::{EditKey, EditOutcome};

fn grid_session(reconciler: &Reconciler) -> EditorSession {
    EditorSession::open(reconciler.clone(), LayoutMode::Grid)
}

#[test]
fn test_actions_persist_before_returning() {
    let tmp = tempfile::tempdir().unwrap();
    let reconciler = Reconciler::local(tmp.path()).unwrap();
    let mut session = grid_session(&reconciler);

    assert!(session.remove(ComponentId::Newsletter));
    assert!(session.resize_preset(ComponentId::Hero, SizePreset::Medium));
    assert!(session.drag(ComponentId::Footer, ComponentId::Testimonials));

    let reopened = EditorSession::open(Reconciler::local(tmp.path()).unwrap(), LayoutMode::Grid);
    assert_eq!(reopened.layout().state(), session.layout().state());
    assert_eq!(reopened.events().len(), 3);
    assert_eq!(reopened.events()[2].action, ActionKind::Drag);

    let hero = reopened.layout().state().get(ComponentId::Hero).unwrap();
    assert_eq!((hero.column_span, hero.row_span), (6, 1));
}

#[test]
fn test_noop_actions_do_not_write() {
    let reconciler = Reconciler::in_memory();
    let mut session = grid_session(&reconciler);

    // List-only operation in grid mode.
    assert!(!session.reorder(0, 2));
    assert!(reconciler.backend().read(keys::LAYOUT_GRID_KEY).unwrap().is_none());
    assert!(reconciler.backend().read(keys::EVENTS_KEY).unwrap().is_none());
}

#[test]
fn test_restore_menu_lists_hidden_with_labels() {
    let mut session = grid_session(&Reconciler::in_memory());
    session.remove(ComponentId::FeaturedProducts);
    assert_eq!(
        session.restorable(),
        vec![(ComponentId::FeaturedProducts, "Featured Products")]
    );
    session.restore(ComponentId::FeaturedProducts);
    assert!(session.restorable().is_empty());
}

#[test]
fn test_reset_layout_clears_snapshots_and_bumps_epoch() {
    let reconciler = Reconciler::in_memory();
    let mut session = grid_session(&reconciler);
    session.remove(ComponentId::Hero);
    assert_eq!(session.epoch(), 0);

    session.reset_layout();
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.layout().state(), &LayoutState::default_arrangement());
    assert!(session.events().is_empty());
    assert!(reconciler.backend().read(keys::LAYOUT_GRID_KEY).unwrap().is_none());
    assert!(reconciler.backend().read(keys::EVENTS_KEY).unwrap().is_none());
}

#[test]
fn test_reset_content_bumps_epoch() {
    let mut session = grid_session(&Reconciler::in_memory());
    session
        .update_field(ContentSection::Hero, "badge", "New")
        .unwrap();
    session.reset_content();
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.content().content(), &ContentState::default());
}

#[test]
fn test_list_and_grid_sessions_are_isolated() {
    let reconciler = Reconciler::in_memory();
    let mut list = EditorSession::open(reconciler.clone(), LayoutMode::List);
    assert!(list.reorder(4, 0));

    let grid = grid_session(&reconciler);
    assert_eq!(grid.layout().state(), &LayoutState::default_arrangement());

    let list = EditorSession::open(reconciler, LayoutMode::List);
    assert_eq!(list.layout().components()[0].id, ComponentId::Footer);
}

#[test]
fn test_apply_response_persists_result_without_events() {
    let reconciler = Reconciler::in_memory();
    let mut session = grid_session(&reconciler);
    let response = parse_response(json!({
        "reason": "Promote products",
        "changes": [
            {"type": "move", "component": "featured-products", "position": "top"},
            {"type": "update_props", "section": "hero", "props": {"heading": "Sale"}}
        ],
        "theme": {"primaryColor": "rose", "mode": "light"}
    }))
    .unwrap();

    let applied = session.apply_response(&response);
    assert_eq!(
        applied,
        vec![
            "Moved featured-products to top",
            "Updated hero content",
            "Changed theme to rose",
        ]
    );
    assert!(session.events().is_empty());

    let reopened = grid_session(&reconciler);
    assert_eq!(
        reopened
            .layout()
            .state()
            .get(ComponentId::FeaturedProducts)
            .unwrap()
            .rect(),
        CANONICAL_SLOTS[0]
    );
    assert_eq!(
        reopened.content().content().field(ContentSection::Hero, "heading"),
        Some("Sale")
    );
    assert_eq!(reopened.content().color_scheme().id, "rose");
    // Preferences are session-local.
    assert_eq!(
        session.preferences().mode,
        storefront_core::ThemeMode::Light
    );
    assert_eq!(reopened.preferences(), Default::default());
}

#[test]
fn test_assistant_context_reflects_session() {
    let mut session = grid_session(&Reconciler::in_memory());
    session.remove(ComponentId::Footer);
    session.set_color_scheme("violet").unwrap();
    session.apply_response(&AiLayoutResponse::mock());

    let value = serde_json::to_value(session.assistant_context()).unwrap();
    assert_eq!(value["theme"]["primaryColor"], json!("emerald"));
    let components = value["layout"]["components"].as_array().unwrap();
    assert!(components
        .iter()
        .any(|c| c == &json!({"id": "footer", "visible": false})));
}

#[test]
fn test_inline_edit_through_session() {
    let mut session = grid_session(&Reconciler::in_memory());
    assert!(session.begin_edit(ContentSection::Hero, "heading").is_err());

    assert!(session.toggle_edit_mode());
    let mut edit = session.begin_edit(ContentSection::Hero, "heading").unwrap();
    edit.input("Fresh Arrivals");
    assert_eq!(
        edit.press(EditKey::Enter, session.content_mut()),
        EditOutcome::Committed("Fresh Arrivals".into())
    );
    assert_eq!(
        session.content().content().field(ContentSection::Hero, "heading"),
        Some("Fresh Arrivals")
    );
}
