//! Threshold-based optimization advice.
//!
//! Advisory text only: no structured remediation, no return channel back
//! into the tracker. Lines come out in modal-name order, so the output is
//! deterministic for a given history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skald_core::ModalName;

use crate::stats::ModalStats;

/// Advisory thresholds. Defaults are the source system's fixed values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    /// Average duration above this is flagged as too slow.
    pub slow_ms: u64,
    /// Success rate below this is flagged as a possible UX problem.
    pub low_success_pct: f64,
    /// Success rate above this, combined with `optimal_ms`, counts as optimal.
    pub optimal_success_pct: f64,
    /// Average duration below this, combined with `optimal_success_pct`,
    /// counts as optimal.
    pub optimal_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            slow_ms: 60_000,
            low_success_pct: 70.0,
            optimal_success_pct: 95.0,
            optimal_ms: 30_000,
        }
    }
}

/// Produce advisory lines for each modal's aggregate stats. A modal can
/// be flagged both slow and low-success; "optimal" is mutually exclusive
/// with both by construction of the default thresholds.
pub fn suggest_optimizations(
    stats: &BTreeMap<ModalName, ModalStats>,
    thresholds: &Thresholds,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    for (name, s) in stats {
        if s.average_duration_ms > thresholds.slow_ms {
            suggestions.push(format!(
                "{name}: average duration {}ms exceeds {}ms, too slow",
                s.average_duration_ms, thresholds.slow_ms
            ));
        }
        if s.success_rate_pct < thresholds.low_success_pct {
            suggestions.push(format!(
                "{name}: success rate {:.2}% is below {:.2}%, possible UX problem",
                s.success_rate_pct, thresholds.low_success_pct
            ));
        }
        if s.success_rate_pct > thresholds.optimal_success_pct
            && s.average_duration_ms < thresholds.optimal_ms
        {
            suggestions.push(format!(
                "{name}: optimal ({:.2}% success, average {}ms)",
                s.success_rate_pct, s.average_duration_ms
            ));
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(entries: &[(&str, u64, f64, u64)]) -> BTreeMap<ModalName, ModalStats> {
        entries
            .iter()
            .map(|(name, avg, rate, total)| {
                (
                    name.to_string(),
                    ModalStats {
                        average_duration_ms: *avg,
                        success_rate_pct: *rate,
                        total_sessions: *total,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn slow_modal_is_flagged() {
        let out = suggest_optimizations(&stats_of(&[("Foo", 61_000, 80.0, 5)]), &Thresholds::default());
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("too slow"));
        assert!(out[0].starts_with("Foo:"));
    }

    #[test]
    fn low_success_is_flagged() {
        let out = suggest_optimizations(&stats_of(&[("Foo", 1_000, 50.0, 4)]), &Thresholds::default());
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("possible UX problem"));
    }

    #[test]
    fn optimal_modal_is_flagged() {
        let out = suggest_optimizations(&stats_of(&[("Foo", 10_000, 100.0, 9)]), &Thresholds::default());
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("optimal"));
    }

    #[test]
    fn slow_and_low_success_both_fire() {
        let out = suggest_optimizations(&stats_of(&[("Foo", 90_000, 10.0, 3)]), &Thresholds::default());
        assert_eq!(out.len(), 2);
        assert!(out[0].contains("too slow"));
        assert!(out[1].contains("possible UX problem"));
    }

    #[test]
    fn thresholds_are_exclusive_at_the_boundary() {
        // Exactly at the limits: "exceeds"/"below" do not fire.
        let out = suggest_optimizations(
            &stats_of(&[("Edge", 60_000, 70.0, 2)]),
            &Thresholds::default(),
        );
        assert!(out.is_empty());

        // 95% exactly is not "exceeds 95%".
        let out = suggest_optimizations(
            &stats_of(&[("Edge", 10_000, 95.0, 2)]),
            &Thresholds::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn unremarkable_modal_gets_no_advice() {
        let out = suggest_optimizations(&stats_of(&[("Foo", 45_000, 85.0, 7)]), &Thresholds::default());
        assert!(out.is_empty());
    }

    #[test]
    fn lines_come_out_in_name_order() {
        let out = suggest_optimizations(
            &stats_of(&[("Zeta", 1_000, 10.0, 1), ("Alpha", 1_000, 10.0, 1)]),
            &Thresholds::default(),
        );
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("Alpha:"));
        assert!(out[1].starts_with("Zeta:"));
    }
}
