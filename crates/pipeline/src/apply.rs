//! Folding a change list over the editor state.
//!
//! Changes are applied in order; each sees the effect of the ones before it.
//! A change that references something unknown is skipped without aborting
//! the rest of the batch. Each change that alters state contributes one
//! human-readable line to [`PipelineResult::applied_changes`].

use serde_json::{Map, Value};
use storefront_core::{
    ColorScheme, Component, ComponentId, ContentSection, ContentState, GridRect, LayoutMode,
    LayoutState, Spacing, StorefrontError, ThemeMode, ThemePreferences, CANONICAL_SLOTS,
};
use tracing::{debug, info, warn};

use crate::action::{AiLayoutResponse, ChangeAction, MoveEdge, MovePosition, ThemePatch};

/// Everything a change list can touch.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub layout: LayoutState,
    pub content: ContentState,
    pub color_scheme: &'static ColorScheme,
    pub preferences: ThemePreferences,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub snapshot: EditorSnapshot,
    pub applied_changes: Vec<String>,
}

/// Applies validated change lists. Holds no state beyond the layout mode,
/// which decides how `move` is interpreted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangePipeline {
    mode: LayoutMode,
}

impl ChangePipeline {
    pub fn new(mode: LayoutMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn apply(&self, current: &EditorSnapshot, response: &AiLayoutResponse) -> PipelineResult {
        info!(reason = %response.reason, changes = response.changes.len(), "Applying change list");

        let mut snapshot = current.clone();
        let mut applied = Vec::new();
        let mut pending_theme = ThemePatch::default();

        for change in &response.changes {
            let line = match change {
                ChangeAction::Move {
                    component,
                    position,
                } => self.apply_move(&mut snapshot.layout, component, *position),
                ChangeAction::Remove { component } => {
                    set_visibility(&mut snapshot.layout, component, false)
                        .then(|| format!("Removed {component}"))
                }
                ChangeAction::ToggleVisibility { component, visible } => {
                    set_visibility(&mut snapshot.layout, component, *visible).then(|| {
                        let verb = if *visible { "Showed" } else { "Hid" };
                        format!("{verb} {component}")
                    })
                }
                ChangeAction::Add { component, .. } => apply_add(&mut snapshot.layout, component),
                ChangeAction::UpdateProps { section, props, .. } => {
                    apply_props(&mut snapshot.content, section, props)
                }
                ChangeAction::UpdateTheme { theme } => {
                    pending_theme.merge(theme);
                    None
                }
            };
            match line {
                Some(line) => applied.push(line),
                None => debug!(change = change.type_name(), "Change left state unchanged"),
            }
        }

        if let Some(theme) = &response.theme {
            pending_theme.merge(theme);
        }
        if let Some(line) = apply_theme(&mut snapshot, &pending_theme) {
            applied.push(line);
        }

        info!(applied = ?applied, "Applied changes");
        PipelineResult {
            snapshot,
            applied_changes: applied,
        }
    }

    fn apply_move(
        &self,
        layout: &mut LayoutState,
        component: &str,
        position: MovePosition,
    ) -> Option<String> {
        let id = lookup(layout, component)?;
        let moved = match self.mode {
            LayoutMode::Grid => move_to_slot(layout, id, position),
            LayoutMode::List => move_in_sequence(layout, id, position),
        };
        moved.then(|| format!("Moved {component} to {position}"))
    }
}

fn lookup(layout: &LayoutState, component: &str) -> Option<ComponentId> {
    let id = component.parse::<ComponentId>().ok()?;
    layout.contains(id).then_some(id)
}

fn target_index(position: MovePosition, len: usize) -> usize {
    let last = len.saturating_sub(1);
    match position {
        MovePosition::Edge(MoveEdge::Top) => 0,
        MovePosition::Edge(MoveEdge::Bottom) => last,
        MovePosition::Index(n) => usize::try_from(n.max(0)).unwrap_or(last).min(last),
    }
}

/// Slot-swap move. Components in `(row, column)` order are the slots; the
/// moved component trades places with the target slot's occupant, then the
/// leading slots are reset to their canonical rectangles so the page keeps
/// its shape. A component already in the target slot is left alone.
fn move_to_slot(layout: &mut LayoutState, id: ComponentId, position: MovePosition) -> bool {
    let mut slots = layout.ordered_by_position();
    let Some(from) = slots.iter().position(|slot| *slot == id) else {
        return false;
    };
    let to = target_index(position, slots.len());
    if from == to {
        return false;
    }
    slots.swap(from, to);

    let mut reordered = Vec::with_capacity(slots.len());
    for (slot, slot_id) in slots.into_iter().enumerate() {
        let Some(mut component) = layout.get(slot_id).cloned() else {
            continue;
        };
        if let Some(rect) = CANONICAL_SLOTS.get(slot) {
            component.set_rect(*rect);
        }
        reordered.push(component);
    }
    layout.components = reordered;
    true
}

fn move_in_sequence(layout: &mut LayoutState, id: ComponentId, position: MovePosition) -> bool {
    let Some(from) = layout.position(id) else {
        return false;
    };
    let to = target_index(position, layout.components.len());
    if from == to {
        return false;
    }
    let moved = layout.components.remove(from);
    layout.components.insert(to, moved);
    true
}

/// Returns whether visibility actually changed.
fn set_visibility(layout: &mut LayoutState, component: &str, visible: bool) -> bool {
    let Some(id) = lookup(layout, component) else {
        return false;
    };
    match layout.get_mut(id) {
        Some(c) if c.visible != visible => {
            c.visible = visible;
            true
        }
        _ => false,
    }
}

fn apply_add(layout: &mut LayoutState, component: &str) -> Option<String> {
    let id = match component.parse::<ComponentId>() {
        Ok(id) => id,
        Err(_) => {
            warn!(component, "Unknown component type in add");
            return None;
        }
    };

    match layout.get_mut(id) {
        Some(existing) if existing.visible => None,
        Some(existing) => {
            existing.visible = true;
            Some(format!("Added {component}"))
        }
        None => {
            let row = if layout.components.is_empty() {
                1
            } else {
                layout.max_row().saturating_add(1)
            };
            layout.components.push(Component::new(id, GridRect::full_row(row)));
            Some(format!("Added {component}"))
        }
    }
}

fn apply_props(content: &mut ContentState, section: &str, props: &Map<String, Value>) -> Option<String> {
    let Ok(target) = section.parse::<ContentSection>() else {
        debug!(section, "Unknown content section");
        return None;
    };

    let mut matched = false;
    for (field, value) in props {
        let Some(text) = value.as_str() else {
            warn!(section, field = %field, "Ignoring non-string content value");
            continue;
        };
        match content.set_field(target, field, text) {
            Ok(()) => matched = true,
            Err(StorefrontError::UnknownField { .. }) => {
                debug!(section, field = %field, "Ignoring unknown content field");
            }
            Err(e) => warn!(error = %e, "Content update failed"),
        }
    }
    matched.then(|| format!("Updated {section} content"))
}

fn apply_theme(snapshot: &mut EditorSnapshot, theme: &ThemePatch) -> Option<String> {
    if let Some(mode) = &theme.mode {
        match mode.parse::<ThemeMode>() {
            Ok(mode) => snapshot.preferences.mode = mode,
            Err(e) => warn!(error = %e, "Ignoring theme mode"),
        }
    }
    if let Some(spacing) = &theme.spacing {
        match spacing.parse::<Spacing>() {
            Ok(spacing) => snapshot.preferences.spacing = spacing,
            Err(e) => warn!(error = %e, "Ignoring theme spacing"),
        }
    }

    let color = theme.primary_color.as_deref()?;
    match ColorScheme::find(color) {
        Some(scheme) => {
            snapshot.color_scheme = scheme;
            Some(format!("Changed theme to {color}"))
        }
        None => {
            warn!(color, "Unknown theme color");
            None
        }
    }
}
