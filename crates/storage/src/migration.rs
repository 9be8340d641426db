//! Layout snapshot migration.
//!
//! Older snapshots predate the grid: components carry only `id` and
//! `visible`, or use the `gridColumn`-style field names. Migration is
//! additive: absent grid fields get their defaults, everything else
//! (including fields this version does not know) is carried forward.

use serde_json::{Map, Value};
use storefront_core::{Component, ComponentId, LayoutState};
use tracing::{info, warn};

use crate::error::StorageError;

/// Legacy field name → current field name.
const LEGACY_FIELDS: [(&str, &str); 4] = [
    ("gridColumn", "column"),
    ("gridColumnSpan", "columnSpan"),
    ("gridRow", "row"),
    ("gridRowSpan", "rowSpan"),
];

/// Defaults for fields an older snapshot may lack.
const FIELD_DEFAULTS: [(&str, u64); 4] = [
    ("column", 1),
    ("columnSpan", 12),
    ("row", 1),
    ("rowSpan", 1),
];

/// Turn a raw layout snapshot into a [`LayoutState`].
///
/// Accepts `{components: [...]}` or a bare array. Entries with an unknown or
/// repeated id are dropped, and ids the snapshot lacks are added back so every
/// component exists exactly once. Any entry that is not an object, or whose
/// fields have the wrong type, rejects the whole snapshot.
pub fn migrate_layout(raw: Value) -> Result<LayoutState, StorageError> {
    let entries = match raw {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("components") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(StorageError::Other("snapshot has no components array".into())),
        },
        other => {
            return Err(StorageError::Other(format!(
                "snapshot is a {}, expected an object",
                json_kind(&other)
            )))
        }
    };

    let mut components: Vec<Component> = Vec::with_capacity(entries.len());
    let mut migrated = 0usize;

    for entry in entries {
        let Value::Object(mut fields) = entry else {
            return Err(StorageError::Other("component entry is not an object".into()));
        };

        let Some(id) = fields.get("id").and_then(Value::as_str) else {
            return Err(StorageError::Other("component entry has no id".into()));
        };
        let id: ComponentId = match id.parse() {
            Ok(id) => id,
            Err(_) => {
                warn!(id, "Dropping unknown component from snapshot");
                continue;
            }
        };
        if components.iter().any(|c| c.id == id) {
            warn!(%id, "Dropping duplicate component from snapshot");
            continue;
        }

        if upgrade_fields(&mut fields) {
            migrated += 1;
        }
        components.push(serde_json::from_value(Value::Object(fields))?);
    }

    if components.is_empty() {
        return Err(StorageError::Other("snapshot has no usable components".into()));
    }
    if migrated > 0 {
        info!("Migrated {} component(s) from an older layout schema", migrated);
    }

    let mut state = LayoutState { components };
    let added = state.fill_missing();
    if !added.is_empty() {
        warn!(?added, "Snapshot was missing components, restored them");
    }
    Ok(state)
}

/// Rename legacy keys and fill absent ones. Returns whether anything changed.
fn upgrade_fields(fields: &mut Map<String, Value>) -> bool {
    let mut changed = false;

    for (legacy, current) in LEGACY_FIELDS {
        if let Some(value) = fields.remove(legacy) {
            changed = true;
            if !fields.contains_key(current) {
                fields.insert(current.to_string(), value);
            }
        }
    }
    for (key, default) in FIELD_DEFAULTS {
        if !fields.contains_key(key) {
            fields.insert(key.to_string(), Value::from(default));
            changed = true;
        }
    }
    if !fields.contains_key("visible") {
        fields.insert("visible".to_string(), Value::Bool(true));
        changed = true;
    }
    changed
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
