//! Per-modal rollup statistics over the workflow-step history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skald_core::{ModalName, WorkflowStep};

/// Aggregate numbers for one modal name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModalStats {
    /// Arithmetic mean of step durations, rounded to the nearest ms.
    pub average_duration_ms: u64,
    /// `100 * confirmed / total`, rounded to two decimals.
    pub success_rate_pct: f64,
    pub total_sessions: u64,
}

/// Group the step history by step name. Pure and deterministic; the
/// insertion order of `steps` does not matter.
pub fn modal_statistics(steps: &[WorkflowStep]) -> BTreeMap<ModalName, ModalStats> {
    let mut grouped: BTreeMap<&str, (u128, u64, u64)> = BTreeMap::new();
    for step in steps {
        let entry = grouped.entry(step.step_name.as_str()).or_default();
        entry.0 += u128::from(step.duration_ms);
        if step.success {
            entry.1 += 1;
        }
        entry.2 += 1;
    }

    grouped
        .into_iter()
        .map(|(name, (total_ms, confirmed, total))| {
            let average_duration_ms = (total_ms as f64 / total as f64).round() as u64;
            let success_rate_pct = round2(100.0 * confirmed as f64 / total as f64);
            (
                name.to_string(),
                ModalStats {
                    average_duration_ms,
                    success_rate_pct,
                    total_sessions: total,
                },
            )
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
