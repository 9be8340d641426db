use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Unknown content section: {0}")]
    UnknownSection(String),

    #[error("Unknown field '{field}' in section '{section}'")]
    UnknownField { section: String, field: String },

    #[error("Unknown color scheme: {0}")]
    UnknownColorScheme(String),

    #[error("Unknown layout mode: {0} (expected 'grid' or 'list')")]
    UnknownLayoutMode(String),

    #[error("Unknown size preset: {0}")]
    UnknownSizePreset(String),

    #[error("Inline editing requires edit mode")]
    EditModeDisabled,

    #[error("{0}")]
    Other(String),
}
