use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Component, ComponentId};

/// User-driven layout action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Remove,
    Restore,
    Resize,
    Drag,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::Move => "move",
            ActionKind::Remove => "remove",
            ActionKind::Restore => "restore",
            ActionKind::Resize => "resize",
            ActionKind::Drag => "drag",
        };
        f.write_str(s)
    }
}

/// Start cell of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub column: u32,
    pub row: u32,
}

impl From<&Component> for Position {
    fn from(c: &Component) -> Self {
        Self {
            column: c.column,
            row: c.row,
        }
    }
}

/// Spans of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub column_span: u32,
    pub row_span: u32,
}

impl From<&Component> for Size {
    fn from(c: &Component) -> Self {
        Self {
            column_span: c.column_span,
            row_span: c.row_span,
        }
    }
}

/// Immutable audit record of one user layout action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub action: ActionKind,
    pub component_id: ComponentId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_size: Option<Size>,
    /// Sequence indices, only set by list-mode reorders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_index: Option<usize>,
}

impl ActionEvent {
    /// A bare event stamped with the current time.
    pub fn now(action: ActionKind, component_id: ComponentId) -> Self {
        Self {
            action,
            component_id,
            timestamp: Utc::now(),
            old_position: None,
            new_position: None,
            old_size: None,
            new_size: None,
            old_index: None,
            new_index: None,
        }
    }

    pub fn with_positions(mut self, old: Position, new: Position) -> Self {
        self.old_position = Some(old);
        self.new_position = Some(new);
        self
    }

    pub fn with_sizes(mut self, old: Size, new: Size) -> Self {
        self.old_size = Some(old);
        self.new_size = Some(new);
        self
    }

    pub fn with_indices(mut self, old: usize, new: usize) -> Self {
        self.old_index = Some(old);
        self.new_index = Some(new);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_millisecond_timestamp_and_skips_empty_fields() {
        let mut event = ActionEvent::now(ActionKind::Move, ComponentId::Hero).with_positions(
            Position { column: 1, row: 1 },
            Position { column: 3, row: 2 },
        );
        event.timestamp = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "move");
        assert_eq!(json["componentId"], "hero");
        assert_eq!(json["timestamp"], 1_700_000_000_123_i64);
        assert_eq!(json["newPosition"]["row"], 2);
        assert!(json.get("oldIndex").is_none());
        assert!(json.get("oldSize").is_none());

        let back: ActionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
