//! Analytics export document.
//!
//! One indented JSON blob for ad-hoc copy-paste inspection; nothing in
//! the workspace consumes it programmatically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skald_core::{ModalName, WorkflowStep};
use skald_tracker::InteractionTracker;
use time::OffsetDateTime;

use crate::advice::{suggest_optimizations, Thresholds};
use crate::stats::{modal_statistics, ModalStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsExport {
    pub modal_statistics: BTreeMap<ModalName, ModalStats>,
    pub workflow_history: Vec<WorkflowStep>,
    pub optimization_suggestions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
}

impl AnalyticsExport {
    /// Assemble the export from a time-ordered step history.
    pub fn from_history(
        history: Vec<WorkflowStep>,
        thresholds: &Thresholds,
        exported_at: OffsetDateTime,
    ) -> Self {
        let modal_statistics = modal_statistics(&history);
        let optimization_suggestions = suggest_optimizations(&modal_statistics, thresholds);
        Self {
            modal_statistics,
            workflow_history: history,
            optimization_suggestions,
            exported_at,
        }
    }
}

/// Serialize the tracker's current history as an indented JSON document.
pub fn export_analytics(
    tracker: &InteractionTracker,
    thresholds: &Thresholds,
) -> anyhow::Result<String> {
    export_analytics_at(tracker, thresholds, OffsetDateTime::now_utc())
}

pub fn export_analytics_at(
    tracker: &InteractionTracker,
    thresholds: &Thresholds,
    exported_at: OffsetDateTime,
) -> anyhow::Result<String> {
    let export = AnalyticsExport::from_history(tracker.workflow_history(), thresholds, exported_at);
    tracing::debug!(
        modals = export.modal_statistics.len(),
        steps = export.workflow_history.len(),
        "Analytics exported"
    );
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ModalStats;
    use skald_core::{ElementInfo, InteractionKind, Outcome, PointerPosition};
    use skald_tracker::{TrackerConfig, TrackerHandle};

    fn at_ms(unix_ms: i128) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(unix_ms * 1_000_000).unwrap()
    }

    fn tracker_with_one_confirmed_foo() -> InteractionTracker {
        let mut t = InteractionTracker::new(TrackerConfig::default());
        let id = t.start_session_at("Foo", at_ms(0));
        t.record_interaction_at(
            InteractionKind::Click,
            ElementInfo::tag("button"),
            "Foo",
            Some(PointerPosition { x: 1.0, y: 2.0 }),
            at_ms(100),
        );
        t.end_session_at(&id, Outcome::Confirmed, at_ms(500));
        t
    }

    #[test]
    fn export_is_indented_json_with_all_sections() {
        let t = tracker_with_one_confirmed_foo();
        let out = export_analytics_at(&t, &Thresholds::default(), at_ms(1_000)).unwrap();

        // Pretty-printed, not a single line.
        assert!(out.contains('\n'));

        let back: AnalyticsExport = serde_json::from_str(&out).unwrap();
        assert_eq!(back.workflow_history.len(), 1);
        assert_eq!(back.modal_statistics["Foo"].average_duration_ms, 500);
        assert_eq!(back.modal_statistics["Foo"].success_rate_pct, 100.0);
        assert_eq!(back.modal_statistics["Foo"].total_sessions, 1);
        // 100% success at 500ms average: optimal.
        assert_eq!(back.optimization_suggestions.len(), 1);
        assert!(back.optimization_suggestions[0].contains("optimal"));
        assert_eq!(back.exported_at, at_ms(1_000));
    }

    #[test]
    fn export_of_empty_tracker_is_valid() {
        let t = InteractionTracker::new(TrackerConfig::default());
        let out = export_analytics_at(&t, &Thresholds::default(), at_ms(0)).unwrap();
        let back: AnalyticsExport = serde_json::from_str(&out).unwrap();
        assert!(back.modal_statistics.is_empty());
        assert!(back.workflow_history.is_empty());
        assert!(back.optimization_suggestions.is_empty());
    }

    #[test]
    fn export_history_is_time_ordered() {
        let mut t = InteractionTracker::new(TrackerConfig::default());
        let late = t.start_session_at("Late", at_ms(900));
        let early = t.start_session_at("Early", at_ms(100));
        t.end_session_at(&late, Outcome::Confirmed, at_ms(950));
        t.end_session_at(&early, Outcome::Cancelled, at_ms(999));

        let out = export_analytics_at(&t, &Thresholds::default(), at_ms(2_000)).unwrap();
        let back: AnalyticsExport = serde_json::from_str(&out).unwrap();
        assert_eq!(back.workflow_history[0].step_name, "Early");
        assert_eq!(back.workflow_history[1].step_name, "Late");
    }

    #[test]
    fn export_through_a_shared_handle() {
        let handle = TrackerHandle::default();
        let scoped = handle.open_scoped("Inquiry");
        assert!(scoped.finish(Outcome::Confirmed).is_some());

        let out = handle
            .with(|t| export_analytics(t, &Thresholds::default()))
            .unwrap();
        let back: AnalyticsExport = serde_json::from_str(&out).unwrap();
        assert_eq!(back.modal_statistics["Inquiry"].total_sessions, 1);
    }

    #[test]
    fn single_session_statistics_through_the_full_pipeline() {
        // One confirmed 500ms "Foo" session with a single click.
        let t = tracker_with_one_confirmed_foo();
        let stats = modal_statistics(t.history());
        assert_eq!(
            stats["Foo"],
            ModalStats {
                average_duration_ms: 500,
                success_rate_pct: 100.0,
                total_sessions: 1
            }
        );
        assert_eq!(t.history()[0].interaction_count, 1);
    }
}
