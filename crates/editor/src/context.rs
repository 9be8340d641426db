//! Current-state summary sent alongside an assistant prompt.

use serde::Serialize;
use storefront_core::{
    ColorScheme, ComponentId, ContentState, LayoutState, Spacing, ThemeMode, ThemePreferences,
};

#[derive(Debug, Clone, Serialize)]
pub struct AssistantContext {
    pub layout: LayoutSummary,
    pub theme: ThemeSummary,
    pub content: ContentState,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    pub components: Vec<ComponentVisibility>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentVisibility {
    pub id: ComponentId,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub primary_color: &'static str,
    pub mode: ThemeMode,
    pub spacing: Spacing,
}

impl AssistantContext {
    pub fn build(
        layout: &LayoutState,
        content: &ContentState,
        color_scheme: &ColorScheme,
        preferences: ThemePreferences,
    ) -> Self {
        Self {
            layout: LayoutSummary {
                components: layout
                    .components
                    .iter()
                    .map(|c| ComponentVisibility {
                        id: c.id,
                        visible: c.visible,
                    })
                    .collect(),
            },
            theme: ThemeSummary {
                primary_color: color_scheme.id,
                mode: preferences.mode,
                spacing: preferences.spacing,
            },
            content: content.clone(),
        }
    }

    /// Serialized form used as the `context` string of a chat request.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
