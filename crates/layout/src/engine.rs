//! Structural layout operations over the ordered component set.
//!
//! Every operation is total: an unknown id (or an operation that does not
//! belong to the current [`LayoutMode`]) leaves the state untouched and
//! returns `false`. Operations that change the layout record an
//! [`ActionEvent`] in the engine's [`EventLog`].

use storefront_core::{
    clamp_column_span, ActionEvent, ActionKind, Component, ComponentId, LayoutMode,
    LayoutState, Position, Size, GRID_COLUMNS,
};
use tracing::debug;

use crate::event_log::EventLog;

pub struct LayoutEngine {
    state: LayoutState,
    mode: LayoutMode,
    events: EventLog,
}

impl LayoutEngine {
    pub fn new(mode: LayoutMode, state: LayoutState, events: EventLog) -> Self {
        Self {
            state,
            mode,
            events,
        }
    }

    /// Engine over the compiled-in default arrangement with an empty log.
    pub fn with_defaults(mode: LayoutMode) -> Self {
        Self::new(mode, LayoutState::default_arrangement(), EventLog::new())
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn components(&self) -> &[Component] {
        &self.state.components
    }

    pub fn visible(&self) -> Vec<&Component> {
        self.state.visible()
    }

    pub fn hidden(&self) -> Vec<&Component> {
        self.state.hidden()
    }

    pub fn max_row(&self) -> u32 {
        self.state.max_row()
    }

    fn require_grid(&self, op: &str) -> bool {
        if self.mode != LayoutMode::Grid {
            debug!("{} ignored in {} mode", op, self.mode);
            return false;
        }
        true
    }

    // ── Grid operations ───────────────────────────────────────

    /// Place a component's start cell. The column is clamped so the component
    /// stays inside the grid; the row floor is 1. Collisions are allowed.
    pub fn move_component(&mut self, id: ComponentId, column: u32, row: u32) -> bool {
        if !self.require_grid("move") {
            return false;
        }
        let Some(component) = self.state.get_mut(id) else {
            return false;
        };

        let old = Position::from(&*component);
        let max_column = GRID_COLUMNS + 1 - component.column_span.clamp(1, GRID_COLUMNS);
        component.column = column.clamp(1, max_column);
        component.row = row.max(1);
        let new = Position::from(&*component);

        self.events
            .record(ActionEvent::now(ActionKind::Move, id).with_positions(old, new));
        true
    }

    /// Set the column span (clamped to `[1, 12]`) and, if given, the row span.
    /// A component pushed past the right edge shifts left to keep its span.
    pub fn resize(&mut self, id: ComponentId, column_span: i64, row_span: Option<u32>) -> bool {
        if !self.require_grid("resize") {
            return false;
        }
        let Some(component) = self.state.get_mut(id) else {
            return false;
        };

        let old = Size::from(&*component);
        let span = clamp_column_span(column_span);
        component.column_span = span;
        if let Some(rows) = row_span {
            component.row_span = rows.max(1);
        }
        if component.rect().last_column() > GRID_COLUMNS {
            component.column = GRID_COLUMNS + 1 - span;
        }
        let new = Size::from(&*component);

        self.events
            .record(ActionEvent::now(ActionKind::Resize, id).with_sizes(old, new));
        true
    }

    /// Exchange the grid rectangles of two components, leaving visibility
    /// alone. This is the drag-and-drop primitive in grid mode: `dragged`
    /// takes over `target`'s slot and vice versa.
    pub fn swap(&mut self, dragged: ComponentId, target: ComponentId) -> bool {
        if !self.require_grid("swap") {
            return false;
        }
        let (Some(a), Some(b)) = (self.state.position(dragged), self.state.position(target))
        else {
            return false;
        };
        if a == b {
            return false;
        }

        let rect_a = self.state.components[a].rect();
        let rect_b = self.state.components[b].rect();
        self.state.components[a].set_rect(rect_b);
        self.state.components[b].set_rect(rect_a);

        self.events.record(
            ActionEvent::now(ActionKind::Drag, dragged).with_positions(
                Position::from(&self.state.components[b]),
                Position::from(&self.state.components[a]),
            ),
        );
        true
    }

    // ── List operations ───────────────────────────────────────

    /// Splice the flat sequence: take the component at `old_index` and
    /// insert it at `new_index`. Grid fields are not touched.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        if self.mode != LayoutMode::List {
            debug!("reorder ignored in {} mode", self.mode);
            return false;
        }
        let len = self.state.components.len();
        if old_index >= len || new_index >= len || old_index == new_index {
            return false;
        }

        let moved = self.state.components.remove(old_index);
        let id = moved.id;
        self.state.components.insert(new_index, moved);

        self.events
            .record(ActionEvent::now(ActionKind::Drag, id).with_indices(old_index, new_index));
        true
    }

    /// Drop `dragged` onto `target`: a rectangle swap in grid mode, a
    /// sequence splice in list mode.
    pub fn drag(&mut self, dragged: ComponentId, target: ComponentId) -> bool {
        match self.mode {
            LayoutMode::Grid => self.swap(dragged, target),
            LayoutMode::List => {
                match (self.state.position(dragged), self.state.position(target)) {
                    (Some(from), Some(to)) => self.reorder(from, to),
                    _ => false,
                }
            }
        }
    }

    // ── Visibility ────────────────────────────────────────────

    /// Hide a component. Its rectangle is kept for a later restore.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        self.set_visible(id, false, ActionKind::Remove)
    }

    /// Show a hidden component where it was.
    pub fn restore(&mut self, id: ComponentId) -> bool {
        self.set_visible(id, true, ActionKind::Restore)
    }

    fn set_visible(&mut self, id: ComponentId, visible: bool, action: ActionKind) -> bool {
        let Some(index) = self.state.position(id) else {
            return false;
        };
        let component = &mut self.state.components[index];
        component.visible = visible;
        let position = Position::from(&*component);

        let mut event = ActionEvent::now(action, id).with_positions(position, position);
        if self.mode == LayoutMode::List {
            event.old_index = Some(index);
        }
        self.events.record(event);
        true
    }

    // ── Whole-state operations ────────────────────────────────

    /// Back to the default arrangement with an empty event log.
    pub fn reset(&mut self) {
        self.state = LayoutState::default_arrangement();
        self.events.clear();
    }

    /// Adopt a layout produced elsewhere (e.g. by the change pipeline).
    /// No event is recorded: the log traces user actions only.
    pub fn replace_state(&mut self, state: LayoutState) {
        self.state = state;
    }
}
