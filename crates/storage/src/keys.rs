//! Versioned snapshot keys.
//!
//! Each schema gets its own key so a reader never misinterprets data written
//! in another shape: a key from a different version simply reads as absent.

use storefront_core::LayoutMode;

/// Grid layout (`column`/`columnSpan`/`row`/`rowSpan` per component).
pub const LAYOUT_GRID_KEY: &str = "storefront-layout-grid-v2";

/// Flat list layout; sequence order is the layout.
pub const LAYOUT_LIST_KEY: &str = "storefront-layout-list-v1";

pub const CONTENT_KEY: &str = "storefront-content-v1";

/// Active color scheme, stored by id only.
pub const COLOR_SCHEME_KEY: &str = "storefront-color-scheme-v1";

pub const EVENTS_KEY: &str = "storefront-layout-events-v1";

pub fn layout_key(mode: LayoutMode) -> &'static str {
    match mode {
        LayoutMode::Grid => LAYOUT_GRID_KEY,
        LayoutMode::List => LAYOUT_LIST_KEY,
    }
}
