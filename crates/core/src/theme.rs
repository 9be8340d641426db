use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorefrontError;

/// One entry of the color scheme catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub primary_hover: &'static str,
    pub primary_light: &'static str,
    pub primary_border: &'static str,
    pub accent: &'static str,
    pub accent_light: &'static str,
}

/// The catalog. The first entry is the fallback for unknown ids.
pub static COLOR_SCHEMES: [ColorScheme; 6] = [
    ColorScheme {
        id: "indigo",
        name: "Indigo",
        primary: "#4f46e5",
        primary_hover: "#6366f1",
        primary_light: "rgba(99, 102, 241, 0.2)",
        primary_border: "rgba(99, 102, 241, 0.3)",
        accent: "#818cf8",
        accent_light: "#a78bfa",
    },
    ColorScheme {
        id: "emerald",
        name: "Emerald",
        primary: "#059669",
        primary_hover: "#10b981",
        primary_light: "rgba(16, 185, 129, 0.2)",
        primary_border: "rgba(16, 185, 129, 0.3)",
        accent: "#34d399",
        accent_light: "#6ee7b7",
    },
    ColorScheme {
        id: "rose",
        name: "Rose",
        primary: "#e11d48",
        primary_hover: "#f43f5e",
        primary_light: "rgba(244, 63, 94, 0.2)",
        primary_border: "rgba(244, 63, 94, 0.3)",
        accent: "#fb7185",
        accent_light: "#fda4af",
    },
    ColorScheme {
        id: "amber",
        name: "Amber",
        primary: "#d97706",
        primary_hover: "#f59e0b",
        primary_light: "rgba(245, 158, 11, 0.2)",
        primary_border: "rgba(245, 158, 11, 0.3)",
        accent: "#fbbf24",
        accent_light: "#fcd34d",
    },
    ColorScheme {
        id: "cyan",
        name: "Cyan",
        primary: "#0891b2",
        primary_hover: "#06b6d4",
        primary_light: "rgba(6, 182, 212, 0.2)",
        primary_border: "rgba(6, 182, 212, 0.3)",
        accent: "#22d3ee",
        accent_light: "#67e8f9",
    },
    ColorScheme {
        id: "violet",
        name: "Violet",
        primary: "#7c3aed",
        primary_hover: "#8b5cf6",
        primary_light: "rgba(139, 92, 246, 0.2)",
        primary_border: "rgba(139, 92, 246, 0.3)",
        accent: "#a78bfa",
        accent_light: "#c4b5fd",
    },
];

impl ColorScheme {
    /// Exact catalog lookup.
    pub fn find(id: &str) -> Option<&'static ColorScheme> {
        COLOR_SCHEMES.iter().find(|s| s.id == id)
    }

    /// Catalog lookup falling back to the first entry.
    pub fn resolve(id: &str) -> &'static ColorScheme {
        Self::find(id).unwrap_or_else(Self::fallback)
    }

    pub fn fallback() -> &'static ColorScheme {
        &COLOR_SCHEMES[0]
    }

    pub fn catalog() -> &'static [ColorScheme] {
        &COLOR_SCHEMES
    }
}

// ── Theme preferences ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Comfortable,
}

impl FromStr for ThemeMode {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(StorefrontError::Other(format!("unknown theme mode: {other}"))),
        }
    }
}

impl FromStr for Spacing {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Spacing::Compact),
            "comfortable" => Ok(Spacing::Comfortable),
            other => Err(StorefrontError::Other(format!("unknown spacing: {other}"))),
        }
    }
}

/// Session-local presentation settings reported to the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreferences {
    pub mode: ThemeMode,
    pub spacing: Spacing,
}
