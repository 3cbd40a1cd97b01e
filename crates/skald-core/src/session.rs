use crate::interaction::Interaction;
use crate::types::{Outcome, SessionId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Build a session id from the modal name and the open timestamp
/// (unix nanoseconds).
///
/// Two same-name sessions opened at the same instant collide; that risk
/// is accepted as negligible and there is no dedup/retry.
pub fn new_session_id(modal_name: &str, opened_at: OffsetDateTime) -> SessionId {
    format!("{modal_name}_{}", opened_at.unix_timestamp_nanos())
}

/// One open-to-close lifetime of a named overlay.
///
/// Created when the modal becomes visible, mutated by every tracked
/// interaction while open, finalized exactly once on close. The tracker
/// removes a session from its open registry the moment it is finalized,
/// so `interactions` is never touched again afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub modal_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub opened_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<OffsetDateTime>,
    pub outcome: Outcome,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Session {
    /// Open a new session. The outcome starts as `Cancelled` pending the
    /// real disposition at close time.
    pub fn open(modal_name: &str, opened_at: OffsetDateTime) -> Self {
        Self {
            id: new_session_id(modal_name, opened_at),
            modal_name: modal_name.to_string(),
            opened_at,
            closed_at: None,
            outcome: Outcome::default(),
            interactions: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Append an observed interaction. Callers must not record against a
    /// finalized session; the tracker guarantees this by only routing to
    /// sessions still in its open registry.
    pub fn record(&mut self, interaction: Interaction) {
        self.interactions.push(interaction);
    }

    /// Finalize with the given outcome. The close timestamp is clamped to
    /// `opened_at` so the duration can never go negative.
    pub fn finalize(&mut self, outcome: Outcome, closed_at: OffsetDateTime) {
        self.closed_at = Some(closed_at.max(self.opened_at));
        self.outcome = outcome;
    }

    /// `closed_at - opened_at` in milliseconds; `None` while still open.
    pub fn duration_ms(&self) -> Option<u64> {
        self.closed_at
            .map(|closed| (closed - self.opened_at).whole_milliseconds().max(0) as u64)
    }
}
