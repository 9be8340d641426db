use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StorefrontError;

/// Number of columns in the layout grid.
pub const GRID_COLUMNS: u32 = 12;

// ── Component identity ────────────────────────────────────────

/// The closed set of placeable page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    Hero,
    FeaturedProducts,
    Newsletter,
    Testimonials,
    Footer,
}

impl ComponentId {
    /// All ids in default page order.
    pub const ALL: [ComponentId; 5] = [
        ComponentId::Hero,
        ComponentId::FeaturedProducts,
        ComponentId::Newsletter,
        ComponentId::Testimonials,
        ComponentId::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Hero => "hero",
            ComponentId::FeaturedProducts => "featured-products",
            ComponentId::Newsletter => "newsletter",
            ComponentId::Testimonials => "testimonials",
            ComponentId::Footer => "footer",
        }
    }

    /// Human-readable name for restore menus and terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::Hero => "Hero Section",
            ComponentId::FeaturedProducts => "Featured Products",
            ComponentId::Newsletter => "Newsletter",
            ComponentId::Testimonials => "Testimonials",
            ComponentId::Footer => "Footer",
        }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentId {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StorefrontError::UnknownComponent(s.to_string()))
    }
}

// ── Grid placement ────────────────────────────────────────────

/// A component's placement on the 12-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRect {
    /// 1-based start column.
    pub column: u32,
    pub column_span: u32,
    /// 1-based start row, unbounded.
    pub row: u32,
    pub row_span: u32,
}

impl GridRect {
    pub const fn new(column: u32, column_span: u32, row: u32, row_span: u32) -> Self {
        Self {
            column,
            column_span,
            row,
            row_span,
        }
    }

    /// A full-width, single-row rectangle at `row`.
    pub const fn full_row(row: u32) -> Self {
        Self::new(1, GRID_COLUMNS, row, 1)
    }

    /// Last row this rectangle occupies.
    pub fn last_row(&self) -> u32 {
        self.row.saturating_add(self.row_span.max(1) - 1)
    }

    /// Last column this rectangle occupies.
    pub fn last_column(&self) -> u32 {
        self.column.saturating_add(self.column_span.max(1) - 1)
    }

    /// Whether the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.column <= other.last_column()
            && other.column <= self.last_column()
            && self.row <= other.last_row()
            && other.row <= self.last_row()
    }

    /// Whether the rectangle stays inside the 12 grid columns.
    pub fn fits_grid(&self) -> bool {
        self.column >= 1
            && (1..=GRID_COLUMNS).contains(&self.column_span)
            && self.last_column() <= GRID_COLUMNS
            && self.row >= 1
            && self.row_span >= 1
    }
}

/// Clamp an untrusted column span into `[1, 12]`.
pub fn clamp_column_span(span: i64) -> u32 {
    span.clamp(1, GRID_COLUMNS as i64) as u32
}

/// Canonical slot rectangles, in slot order: hero full-width, two-column
/// middle row (wide left, narrow right), full-width testimonials and footer.
pub const CANONICAL_SLOTS: [GridRect; 5] = [
    GridRect::new(1, 12, 1, 1),
    GridRect::new(1, 8, 2, 1),
    GridRect::new(9, 4, 2, 1),
    GridRect::new(1, 12, 3, 1),
    GridRect::new(1, 12, 4, 1),
];

// ── Size presets ──────────────────────────────────────────────

/// Resize picker presets offered by the section toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    Small,
    Medium,
    Large,
    Full,
}

impl SizePreset {
    pub const ALL: [SizePreset; 4] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::Full,
    ];

    pub fn column_span(&self) -> u32 {
        match self {
            SizePreset::Small => 4,
            SizePreset::Medium => 6,
            SizePreset::Large => 8,
            SizePreset::Full => 12,
        }
    }

    pub fn row_span(&self) -> u32 {
        1
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizePreset::Small => "Small (4 cols)",
            SizePreset::Medium => "Medium (6 cols)",
            SizePreset::Large => "Large (8 cols)",
            SizePreset::Full => "Full (12 cols)",
        }
    }
}

impl FromStr for SizePreset {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" | "4" => Ok(SizePreset::Small),
            "medium" | "6" => Ok(SizePreset::Medium),
            "large" | "8" => Ok(SizePreset::Large),
            "full" | "12" => Ok(SizePreset::Full),
            other => Err(StorefrontError::UnknownSizePreset(other.to_string())),
        }
    }
}

// ── Component ─────────────────────────────────────────────────

/// One placeable section and its grid placement.
///
/// Fields that this version does not know about are kept in `extra` so a
/// load/save cycle never strips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub visible: bool,
    pub column: u32,
    pub column_span: u32,
    pub row: u32,
    pub row_span: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    pub fn new(id: ComponentId, rect: GridRect) -> Self {
        Self {
            id,
            visible: true,
            column: rect.column,
            column_span: rect.column_span,
            row: rect.row,
            row_span: rect.row_span,
            extra: Map::new(),
        }
    }

    pub fn rect(&self) -> GridRect {
        GridRect::new(self.column, self.column_span, self.row, self.row_span)
    }

    /// Overwrite the placement, leaving visibility and extra fields alone.
    pub fn set_rect(&mut self, rect: GridRect) {
        self.column = rect.column;
        self.column_span = rect.column_span;
        self.row = rect.row;
        self.row_span = rect.row_span;
    }
}

// ── Layout modes ──────────────────────────────────────────────

/// How the page arranges its components.
///
/// `List` is the older flat reorderable mode: only sequence order matters and
/// grid fields are carried along untouched. `Grid` places by rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    List,
    #[default]
    Grid,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::List => "list",
            LayoutMode::Grid => "grid",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(LayoutMode::List),
            "grid" => Ok(LayoutMode::Grid),
            other => Err(StorefrontError::UnknownLayoutMode(other.to_string())),
        }
    }
}

// ── Layout state ──────────────────────────────────────────────

/// Every component, visible or hidden, in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub components: Vec<Component>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::default_arrangement()
    }
}

impl LayoutState {
    /// The compiled-in arrangement: each component in its canonical slot.
    pub fn default_arrangement() -> Self {
        let components = ComponentId::ALL
            .into_iter()
            .zip(CANONICAL_SLOTS)
            .map(|(id, rect)| Component::new(id, rect))
            .collect();
        Self { components }
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn position(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn visible(&self) -> Vec<&Component> {
        self.components.iter().filter(|c| c.visible).collect()
    }

    pub fn hidden(&self) -> Vec<&Component> {
        self.components.iter().filter(|c| !c.visible).collect()
    }

    pub fn hidden_ids(&self) -> Vec<ComponentId> {
        self.hidden().into_iter().map(|c| c.id).collect()
    }

    pub fn visible_ids(&self) -> Vec<ComponentId> {
        self.visible().into_iter().map(|c| c.id).collect()
    }

    /// Lowest row below every component (hidden ones included), floor 1.
    pub fn max_row(&self) -> u32 {
        self.components
            .iter()
            .map(|c| c.rect().last_row())
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Add back every id the collection lacks, visible, in its canonical slot
    /// when that slot is free or else as a full-width row at the bottom.
    /// Returns the ids that were added.
    pub fn fill_missing(&mut self) -> Vec<ComponentId> {
        let mut added = Vec::new();
        for (id, slot) in ComponentId::ALL.into_iter().zip(CANONICAL_SLOTS) {
            if self.contains(id) {
                continue;
            }
            let slot_taken = self.components.iter().any(|c| c.rect().overlaps(&slot));
            let rect = if slot_taken {
                GridRect::full_row(self.max_row().saturating_add(1))
            } else {
                slot
            };
            self.components.push(Component::new(id, rect));
            added.push(id);
        }
        added
    }

    /// Component ids sorted by `(row, column)`, ties kept in sequence order.
    pub fn ordered_by_position(&self) -> Vec<ComponentId> {
        let mut ordered: Vec<&Component> = self.components.iter().collect();
        ordered.sort_by_key(|c| (c.row, c.column));
        ordered.into_iter().map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_id_round_trips_through_str() {
        for id in ComponentId::ALL {
            assert_eq!(id.as_str().parse::<ComponentId>().unwrap(), id);
        }
        assert!("promo-banner".parse::<ComponentId>().is_err());
    }

    #[test]
    fn component_id_serializes_kebab_case() {
        let json = serde_json::to_string(&ComponentId::FeaturedProducts).unwrap();
        assert_eq!(json, "\"featured-products\"");
    }

    #[test]
    fn clamp_column_span_bounds() {
        assert_eq!(clamp_column_span(-4), 1);
        assert_eq!(clamp_column_span(0), 1);
        assert_eq!(clamp_column_span(7), 7);
        assert_eq!(clamp_column_span(40), 12);
    }

    #[test]
    fn default_arrangement_uses_canonical_slots() {
        let layout = LayoutState::default_arrangement();
        assert_eq!(layout.components.len(), 5);
        for (component, slot) in layout.components.iter().zip(CANONICAL_SLOTS) {
            assert!(component.visible);
            assert_eq!(component.rect(), slot);
            assert!(slot.fits_grid());
        }
        assert_eq!(layout.max_row(), 4);
    }

    #[test]
    fn max_row_accounts_for_row_span_and_floor() {
        let mut layout = LayoutState::default_arrangement();
        layout.get_mut(ComponentId::Footer).unwrap().row_span = 3;
        assert_eq!(layout.max_row(), 6);

        let empty = LayoutState { components: vec![] };
        assert_eq!(empty.max_row(), 1);
    }

    #[test]
    fn extreme_rows_saturate_instead_of_overflowing() {
        let mut layout = LayoutState::default_arrangement();
        let hero = layout.get_mut(ComponentId::Hero).unwrap();
        hero.row = u32::MAX;
        hero.row_span = u32::MAX;
        assert_eq!(layout.max_row(), u32::MAX);

        let wide = GridRect::new(u32::MAX, 12, 1, 1);
        assert_eq!(wide.last_column(), u32::MAX);
        assert!(!wide.fits_grid());
    }

    #[test]
    fn fill_missing_restores_absent_ids() {
        let mut layout = LayoutState::default_arrangement();
        layout
            .components
            .retain(|c| matches!(c.id, ComponentId::Hero | ComponentId::Testimonials));
        assert_eq!(
            layout.fill_missing(),
            vec![
                ComponentId::FeaturedProducts,
                ComponentId::Newsletter,
                ComponentId::Footer,
            ]
        );
        assert_eq!(layout, {
            let mut expected = LayoutState::default_arrangement();
            expected
                .components
                .retain(|c| matches!(c.id, ComponentId::Hero | ComponentId::Testimonials));
            expected.components.push(Component::new(ComponentId::FeaturedProducts, CANONICAL_SLOTS[1]));
            expected.components.push(Component::new(ComponentId::Newsletter, CANONICAL_SLOTS[2]));
            expected.components.push(Component::new(ComponentId::Footer, CANONICAL_SLOTS[4]));
            expected
        });
        assert!(layout.fill_missing().is_empty());
    }

    #[test]
    fn fill_missing_appends_when_slot_is_taken() {
        let mut layout = LayoutState {
            components: vec![Component::new(ComponentId::Hero, GridRect::new(1, 12, 1, 4))],
        };
        layout.fill_missing();
        assert_eq!(layout.components.len(), 5);
        let rows: Vec<u32> = layout.components[1..].iter().map(|c| c.row).collect();
        assert_eq!(rows, vec![5, 6, 7, 8]);
        assert!(layout.components.iter().all(|c| c.visible && c.rect().fits_grid()));
    }

    #[test]
    fn ordered_by_position_sorts_row_then_column() {
        let mut layout = LayoutState::default_arrangement();
        layout
            .get_mut(ComponentId::Footer)
            .unwrap()
            .set_rect(GridRect::full_row(1));
        layout
            .get_mut(ComponentId::Hero)
            .unwrap()
            .set_rect(GridRect::new(5, 4, 1, 1));
        assert_eq!(
            layout.ordered_by_position(),
            vec![
                ComponentId::Footer,
                ComponentId::Hero,
                ComponentId::FeaturedProducts,
                ComponentId::Newsletter,
                ComponentId::Testimonials,
            ]
        );
    }

    #[test]
    fn component_serializes_camel_case_and_keeps_extra_fields() {
        let json = serde_json::json!({
            "id": "hero",
            "visible": false,
            "column": 2,
            "columnSpan": 6,
            "row": 3,
            "rowSpan": 1,
            "pinned": true
        });
        let component: Component = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(component.rect(), GridRect::new(2, 6, 3, 1));
        assert_eq!(component.extra.get("pinned"), Some(&Value::Bool(true)));
        assert_eq!(serde_json::to_value(&component).unwrap(), json);
    }

    #[test]
    fn size_presets_parse_by_name_or_columns() {
        assert_eq!("small".parse::<SizePreset>().unwrap(), SizePreset::Small);
        assert_eq!("8".parse::<SizePreset>().unwrap(), SizePreset::Large);
        assert_eq!(SizePreset::Full.column_span(), 12);
        assert!("huge".parse::<SizePreset>().is_err());
    }

    #[test]
    fn layout_mode_parses_case_insensitively() {
        assert_eq!("GRID".parse::<LayoutMode>().unwrap(), LayoutMode::Grid);
        assert_eq!(" list ".parse::<LayoutMode>().unwrap(), LayoutMode::List);
        assert!("masonry".parse::<LayoutMode>().is_err());
    }
}
