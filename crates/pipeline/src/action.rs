//! Typed change actions.
//!
//! Component and section references stay as raw strings here: an unknown
//! reference is not a parse failure, it is skipped when the change is applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire names of every change type, in declaration order.
pub const CHANGE_TYPES: [&str; 6] = [
    "move",
    "remove",
    "add",
    "update_props",
    "toggle_visibility",
    "update_theme",
];

/// One atomic instruction from a change list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeAction {
    /// Reposition a component to `top`, `bottom` or a slot index.
    Move {
        component: String,
        position: MovePosition,
    },

    /// Hide a component.
    Remove { component: String },

    /// Show a hidden component, or append it if the layout lacks it.
    Add {
        component: String,
        #[serde(default)]
        props: Map<String, Value>,
    },

    /// Merge string fields into one content section.
    UpdateProps {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<String>,
        section: String,
        #[serde(default)]
        props: Map<String, Value>,
    },

    ToggleVisibility { component: String, visible: bool },

    /// Partial theme, merged into the pending theme and applied at the end.
    UpdateTheme { theme: ThemePatch },
}

impl ChangeAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            ChangeAction::Move { .. } => "move",
            ChangeAction::Remove { .. } => "remove",
            ChangeAction::Add { .. } => "add",
            ChangeAction::UpdateProps { .. } => "update_props",
            ChangeAction::ToggleVisibility { .. } => "toggle_visibility",
            ChangeAction::UpdateTheme { .. } => "update_theme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveEdge {
    Top,
    Bottom,
}

/// Target of a `move`: a named edge or a zero-based slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovePosition {
    Edge(MoveEdge),
    Index(i64),
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovePosition::Edge(MoveEdge::Top) => f.write_str("top"),
            MovePosition::Edge(MoveEdge::Bottom) => f.write_str("bottom"),
            MovePosition::Index(n) => write!(f, "{n}"),
        }
    }
}

/// Theme fields, each optional so partial themes can be merged.
///
/// Values are kept as strings; names outside the catalog are ignored when
/// the theme is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ThemePatch {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &ThemePatch) {
        if other.primary_color.is_some() {
            self.primary_color.clone_from(&other.primary_color);
        }
        if other.spacing.is_some() {
            self.spacing.clone_from(&other.spacing);
        }
        if other.mode.is_some() {
            self.mode.clone_from(&other.mode);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none() && self.spacing.is_none() && self.mode.is_none()
    }
}

/// A validated change list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiLayoutResponse {
    pub reason: String,
    pub changes: Vec<ChangeAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePatch>,
}

impl AiLayoutResponse {
    /// Canned response used for offline demos: products to the top,
    /// testimonials shown, emerald theme.
    pub fn mock() -> Self {
        Self {
            reason: "Optimizing layout based on user engagement patterns".to_string(),
            changes: vec![
                ChangeAction::Move {
                    component: "featured-products".to_string(),
                    position: MovePosition::Edge(MoveEdge::Top),
                },
                ChangeAction::ToggleVisibility {
                    component: "testimonials".to_string(),
                    visible: true,
                },
            ],
            theme: Some(ThemePatch {
                primary_color: Some("emerald".to_string()),
                spacing: Some("comfortable".to_string()),
                mode: Some("dark".to_string()),
            }),
        }
    }
}
