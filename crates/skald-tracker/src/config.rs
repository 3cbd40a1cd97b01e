use serde::{Deserialize, Serialize};

/// Env var overriding the default history bound.
const HISTORY_CAPACITY_ENV: &str = "SKALD_HISTORY_CAPACITY";

/// Tracker behavior knobs.
///
/// `history_capacity: None` means the workflow-step history accumulates
/// without bound for the life of the tracker. That is the default and is
/// an explicit choice: the intended usage is short-lived interactive
/// sessions, not long-running telemetry. Hosts that keep a tracker alive
/// for hours should set a bound; the oldest step is evicted on overflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_capacity: Option<usize>,
}

impl TrackerConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history_capacity: Some(capacity),
        }
    }

    /// Read config from the environment. An unset, unparseable, or zero
    /// `SKALD_HISTORY_CAPACITY` falls back to unbounded.
    pub fn from_env() -> Self {
        let history_capacity = std::env::var(HISTORY_CAPACITY_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0);
        Self { history_capacity }
    }
}
