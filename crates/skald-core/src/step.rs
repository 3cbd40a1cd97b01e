use crate::session::Session;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Immutable historical record derived from a finalized session.
///
/// `ts` is the session's open time, which is what history ordering and
/// aggregation key on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStep {
    pub step_name: String,
    pub duration_ms: u64,
    pub interaction_count: u64,
    pub success: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
}

impl WorkflowStep {
    /// Derive a step from a finalized session. An (impossible for the
    /// tracker) still-open session yields a zero duration.
    pub fn from_session(session: &Session) -> Self {
        Self {
            step_name: session.modal_name.clone(),
            duration_ms: session.duration_ms().unwrap_or(0),
            interaction_count: session.interactions.len() as u64,
            success: session.outcome.is_success(),
            ts: session.opened_at,
        }
    }
}
