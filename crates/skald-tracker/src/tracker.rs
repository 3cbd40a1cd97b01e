//! Open-session registry and interaction routing.
//!
//! One `InteractionTracker` holds the process-wide bookkeeping: the map of
//! currently-open sessions, the single last-click timestamp, and the
//! append-only workflow-step history. The plain struct is synchronous and
//! single-threaded; `TrackerHandle` is the shareable form hosts construct
//! once at startup and pass to every overlay that reports into it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skald_core::{
    ElementInfo, Interaction, InteractionKind, Outcome, PointerPosition, Session, SessionId,
    WorkflowStep,
};
use time::OffsetDateTime;

use crate::config::TrackerConfig;

/// Records modal lifecycle sessions and produces the workflow history
/// that aggregate reporting runs over.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    config: TrackerConfig,
    open: BTreeMap<SessionId, Session>,
    last_click_at: Option<OffsetDateTime>,
    history: Vec<WorkflowStep>,
}

impl InteractionTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // ── Session lifecycle ──

    /// Start a session for `modal_name` at the current wall-clock time.
    /// Always succeeds; the name is not validated and need not be unique.
    pub fn start_session(&mut self, modal_name: &str) -> SessionId {
        self.start_session_at(modal_name, OffsetDateTime::now_utc())
    }

    pub fn start_session_at(&mut self, modal_name: &str, at: OffsetDateTime) -> SessionId {
        let session = Session::open(modal_name, at);
        let id = session.id.clone();
        tracing::debug!(session = %id, modal = %modal_name, "Session opened");
        self.open.insert(id.clone(), session);
        id
    }

    /// Finalize the session `id` with `outcome` and append the derived
    /// workflow step to history. Returns the finalized session, or `None`
    /// if the id is unknown or already closed (silent no-op: history is
    /// left untouched and a repeat call is safe).
    pub fn end_session(&mut self, id: &str, outcome: Outcome) -> Option<Session> {
        self.end_session_at(id, outcome, OffsetDateTime::now_utc())
    }

    pub fn end_session_at(
        &mut self,
        id: &str,
        outcome: Outcome,
        at: OffsetDateTime,
    ) -> Option<Session> {
        let Some(mut session) = self.open.remove(id) else {
            tracing::debug!(session = %id, "End of unknown session ignored");
            return None;
        };
        session.finalize(outcome, at);
        let step = WorkflowStep::from_session(&session);
        tracing::info!(
            session = %session.id,
            modal = %session.modal_name,
            outcome = %session.outcome,
            duration_ms = step.duration_ms,
            interactions = step.interaction_count,
            "Session closed"
        );
        self.push_step(step);
        Some(session)
    }

    fn push_step(&mut self, step: WorkflowStep) {
        self.history.push(step);
        if let Some(capacity) = self.config.history_capacity {
            while self.history.len() > capacity {
                let evicted = self.history.remove(0);
                tracing::debug!(step = %evicted.step_name, "History at capacity, oldest step evicted");
            }
        }
    }

    // ── Interaction routing ──

    /// Record one user action at the current wall-clock time.
    pub fn record_interaction(
        &mut self,
        kind: InteractionKind,
        element: ElementInfo,
        modal_context: &str,
        pointer: Option<PointerPosition>,
    ) {
        self.record_interaction_at(kind, element, modal_context, pointer, OffsetDateTime::now_utc())
    }

    /// Record one user action. The interaction is appended to every open
    /// session whose modal name equals `modal_context` (fan-out: two
    /// same-name sessions both receive a copy). With no match it is
    /// dropped, but a click still advances the last-click scalar.
    pub fn record_interaction_at(
        &mut self,
        kind: InteractionKind,
        element: ElementInfo,
        modal_context: &str,
        pointer: Option<PointerPosition>,
        at: OffsetDateTime,
    ) {
        let since_last_click_ms = if kind.is_pointer() {
            self.last_click_at
                .map(|last| (at - last).whole_milliseconds().max(0) as u64)
        } else {
            None
        };

        let interaction =
            Interaction::observed(kind, element, modal_context, pointer, at, since_last_click_ms);

        let mut matched = 0usize;
        for session in self
            .open
            .values_mut()
            .filter(|s| s.modal_name == modal_context)
        {
            session.record(interaction.clone());
            matched += 1;
        }

        if kind.is_pointer() {
            self.last_click_at = Some(at);
        }

        tracing::debug!(
            kind = %kind,
            modal = %modal_context,
            sessions = matched,
            "Interaction recorded"
        );
    }

    // ── Queries ──

    /// Raw step history in insertion (finalization) order.
    pub fn history(&self) -> &[WorkflowStep] {
        &self.history
    }

    /// Step history sorted ascending by `ts`; ties keep insertion order.
    pub fn workflow_history(&self) -> Vec<WorkflowStep> {
        let mut steps = self.history.clone();
        steps.sort_by(|a, b| a.ts.cmp(&b.ts));
        steps
    }

    pub fn open_session_count(&self) -> usize {
        self.open.len()
    }

    pub fn open_session(&self, id: &str) -> Option<&Session> {
        self.open.get(id)
    }

    pub fn last_click_at(&self) -> Option<OffsetDateTime> {
        self.last_click_at
    }

    /// Wipe history and all open sessions unconditionally.
    pub fn clear(&mut self) {
        tracing::info!(
            open_sessions = self.open.len(),
            steps = self.history.len(),
            "Tracker cleared"
        );
        self.open.clear();
        self.history.clear();
        self.last_click_at = None;
    }
}

/// Cloneable handle around a shared tracker.
///
/// This is the explicit context object the host application constructs
/// once and hands to each overlay, instead of a module-level global. All
/// operations serialize through the inner mutex; a poisoned mutex is
/// recovered rather than propagated, since every tracker mutation runs to
/// completion and cannot leave the state torn.
#[derive(Debug)]
pub struct TrackerHandle {
    inner: Arc<Mutex<InteractionTracker>>,
}

impl TrackerHandle {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InteractionTracker::new(config))),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, InteractionTracker> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start_session(&self, modal_name: &str) -> SessionId {
        self.lock().start_session(modal_name)
    }

    pub fn end_session(&self, id: &str, outcome: Outcome) -> Option<Session> {
        self.lock().end_session(id, outcome)
    }

    pub fn record_interaction(
        &self,
        kind: InteractionKind,
        element: ElementInfo,
        modal_context: &str,
        pointer: Option<PointerPosition>,
    ) {
        self.lock()
            .record_interaction(kind, element, modal_context, pointer)
    }

    pub fn workflow_history(&self) -> Vec<WorkflowStep> {
        self.lock().workflow_history()
    }

    pub fn open_session_count(&self) -> usize {
        self.lock().open_session_count()
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    /// Run a read-only closure against the tracker (for reporting).
    pub fn with<R>(&self, f: impl FnOnce(&InteractionTracker) -> R) -> R {
        f(&self.lock())
    }
}

impl Default for TrackerHandle {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Clone for TrackerHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
