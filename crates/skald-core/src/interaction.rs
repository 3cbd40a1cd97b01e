use crate::types::InteractionKind;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The DOM-ish element an interaction landed on. Nothing is validated;
/// empty strings are accepted as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementInfo {
    /// Tag name ("button", "input", ...).
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl ElementInfo {
    pub fn tag(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            class: None,
        }
    }
}

/// Pointer coordinates at the moment of a click. Negative or out-of-view
/// values are accepted unchecked.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// A single user action observed while a session is open.
///
/// `since_last_click_ms` is measured against the tracker-wide last-click
/// timestamp (not per-session), and only for clicks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub x: f64,
    pub y: f64,
    pub element_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_class: Option<String>,
    pub kind: InteractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_last_click_ms: Option<u64>,
    /// The modal name this interaction was attributed to.
    pub modal_context: String,
}

impl Interaction {
    /// Build an interaction observed at `at`. Coordinates are taken from
    /// `pointer` for pointer actions and zeroed otherwise.
    pub fn observed(
        kind: InteractionKind,
        element: ElementInfo,
        modal_context: &str,
        pointer: Option<PointerPosition>,
        at: OffsetDateTime,
        since_last_click_ms: Option<u64>,
    ) -> Self {
        let position = if kind.is_pointer() {
            pointer.unwrap_or_default()
        } else {
            PointerPosition::default()
        };
        Self {
            at,
            x: position.x,
            y: position.y,
            element_kind: element.kind,
            element_id: element.id,
            element_class: element.class,
            kind,
            since_last_click_ms,
            modal_context: modal_context.to_string(),
        }
    }
}
