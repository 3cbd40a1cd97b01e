//! Scoped sessions: finalization guaranteed on drop.
//!
//! The source system could leak a session forever when the owning overlay
//! was torn down without an explicit close. `ScopedSession` removes that
//! leak class: if the guard is dropped without `finish`, the session is
//! closed as `Cancelled` at that moment.

use skald_core::{ElementInfo, InteractionKind, Outcome, PointerPosition, Session, SessionId};

use crate::tracker::TrackerHandle;

/// Drop guard for one tracked session.
#[derive(Debug)]
pub struct ScopedSession {
    handle: TrackerHandle,
    id: SessionId,
    modal_name: String,
    finished: bool,
}

impl TrackerHandle {
    /// Start a session whose finalization is tied to the returned guard.
    pub fn open_scoped(&self, modal_name: &str) -> ScopedSession {
        let id = self.start_session(modal_name);
        ScopedSession {
            handle: self.clone(),
            id,
            modal_name: modal_name.to_string(),
            finished: false,
        }
    }
}

impl ScopedSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn modal_name(&self) -> &str {
        &self.modal_name
    }

    /// Record an interaction attributed to this guard's modal name. Fan-out
    /// still applies: another open session with the same name receives a
    /// copy too.
    pub fn record_interaction(
        &self,
        kind: InteractionKind,
        element: ElementInfo,
        pointer: Option<PointerPosition>,
    ) {
        self.handle
            .record_interaction(kind, element, &self.modal_name, pointer);
    }

    /// Close explicitly with `outcome`. Returns `None` if the session is
    /// already gone (e.g. the tracker was cleared while the guard lived).
    pub fn finish(mut self, outcome: Outcome) -> Option<Session> {
        self.finished = true;
        self.handle.end_session(&self.id, outcome)
    }
}

impl Drop for ScopedSession {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(session = %self.id, "Scoped session dropped unfinished, closing as cancelled");
            self.handle.end_session(&self.id, Outcome::Cancelled);
        }
    }
}
