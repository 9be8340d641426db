//! Structural validation of change lists.
//!
//! Validation checks shape only. Whether a component id or section name
//! exists is decided at apply time.

use serde_json::Value;
use tracing::warn;

use crate::action::{AiLayoutResponse, ChangeAction, ThemePatch, CHANGE_TYPES};
use crate::error::PipelineError;

/// Accepts an object with a string `reason` and a `changes` array whose
/// elements are objects with a known `type`.
pub fn validate(response: &Value) -> bool {
    let Some(obj) = response.as_object() else {
        return false;
    };
    if !obj.get("reason").is_some_and(Value::is_string) {
        return false;
    }
    let Some(changes) = obj.get("changes").and_then(Value::as_array) else {
        return false;
    };
    changes.iter().all(|change| {
        change
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| CHANGE_TYPES.contains(&t))
    })
}

/// Validate and type a raw response.
///
/// A change with a known type but a malformed body is dropped with a
/// warning. A malformed top-level `theme` is treated as absent.
pub fn parse_response(raw: Value) -> Result<AiLayoutResponse, PipelineError> {
    if !validate(&raw) {
        return Err(PipelineError::InvalidResponse);
    }
    let Value::Object(mut obj) = raw else {
        return Err(PipelineError::InvalidResponse);
    };

    let reason = match obj.remove("reason") {
        Some(Value::String(reason)) => reason,
        _ => return Err(PipelineError::InvalidResponse),
    };
    let raw_changes = match obj.remove("changes") {
        Some(Value::Array(changes)) => changes,
        _ => return Err(PipelineError::InvalidResponse),
    };

    let mut changes = Vec::with_capacity(raw_changes.len());
    for (index, raw_change) in raw_changes.into_iter().enumerate() {
        match serde_json::from_value::<ChangeAction>(raw_change) {
            Ok(change) => changes.push(change),
            Err(e) => warn!(index, error = %e, "Skipping malformed change"),
        }
    }

    let theme = match obj.remove("theme") {
        None | Some(Value::Null) => None,
        Some(raw_theme) => match serde_json::from_value::<ThemePatch>(raw_theme) {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed theme");
                None
            }
        },
    };

    Ok(AiLayoutResponse {
        reason,
        changes,
        theme,
    })
}

/// Parse a JSON string, then [`parse_response`].
pub fn parse_response_str(raw: &str) -> Result<AiLayoutResponse, PipelineError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PipelineError::Parse(e.to_string()))?;
    parse_response(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::action::{MoveEdge, MovePosition};

    #[test]
    fn validate_rejects_incomplete_shapes() {
        assert!(!validate(&json!({})));
        assert!(!validate(&json!({"reason": "x"})));
        assert!(!validate(&json!({"reason": "x", "changes": [{"type": "unknown"}]})));
        assert!(!validate(&json!({"reason": 5, "changes": []})));
        assert!(!validate(&json!({"reason": "x", "changes": {}})));
        assert!(!validate(&json!({"reason": "x", "changes": [null]})));
        assert!(!validate(&json!({"reason": "x", "changes": [{"component": "hero"}]})));
        assert!(!validate(&json!([])));
    }

    #[test]
    fn validate_accepts_well_formed_lists() {
        assert!(validate(&json!({"reason": "x", "changes": []})));
        // References are not checked here.
        assert!(validate(&json!({
            "reason": "x",
            "changes": [{"type": "remove", "component": "sidebar"}]
        })));
    }

    #[test]
    fn parse_types_changes_and_theme() {
        let response = parse_response(json!({
            "reason": "Promote products",
            "changes": [
                {"type": "move", "component": "featured-products", "position": "top"},
                {"type": "remove", "component": "footer"}
            ],
            "theme": {"primaryColor": "rose", "spacing": "comfortable", "mode": "dark"}
        }))
        .unwrap();

        assert_eq!(response.reason, "Promote products");
        assert_eq!(response.changes.len(), 2);
        assert!(matches!(
            &response.changes[0],
            ChangeAction::Move { position: MovePosition::Edge(MoveEdge::Top), .. }
        ));
        assert_eq!(
            response.theme.unwrap().primary_color.as_deref(),
            Some("rose")
        );
    }

    #[test]
    fn parse_skips_malformed_change_bodies() {
        let response = parse_response(json!({
            "reason": "x",
            "changes": [
                {"type": "remove"},
                {"type": "remove", "component": "footer"}
            ]
        }))
        .unwrap();
        assert_eq!(
            response.changes,
            vec![ChangeAction::Remove { component: "footer".into() }]
        );
    }

    #[test]
    fn parse_drops_malformed_theme() {
        let response = parse_response(json!({
            "reason": "x",
            "changes": [],
            "theme": "rose"
        }))
        .unwrap();
        assert!(response.theme.is_none());
    }

    #[test]
    fn parse_rejects_invalid_shape() {
        assert_eq!(
            parse_response(json!({"reason": "x"})),
            Err(PipelineError::InvalidResponse)
        );
        assert_eq!(
            PipelineError::InvalidResponse.to_string(),
            "Invalid response format"
        );
    }

    #[test]
    fn parse_str_reports_bad_json() {
        assert!(matches!(
            parse_response_str("{oops"),
            Err(PipelineError::Parse(_))
        ));
        assert!(parse_response_str(r#"{"reason":"x","changes":[]}"#).is_ok());
    }
}
