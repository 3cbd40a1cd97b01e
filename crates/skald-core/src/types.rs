use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Session ID format: `<modal-name>_<unix-nanos>`
pub type SessionId = String;

/// Modal name (e.g. "CreateCompany"). Not unique; several open sessions
/// may share one name.
pub type ModalName = String;

/// Terminal disposition of a session.
///
/// A session that is never explicitly confirmed counts as `Cancelled`,
/// which is why that is the default while a session is still open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Confirmed,
    #[default]
    Cancelled,
    Timeout,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Confirmed => "confirmed",
            Outcome::Cancelled => "cancelled",
            Outcome::Timeout => "timeout",
        }
    }

    /// Whether this outcome counts as a successful workflow step.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Confirmed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown outcome: {0:?}")]
pub struct UnknownOutcome(pub String);

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Outcome::Confirmed),
            "cancelled" => Ok(Outcome::Cancelled),
            "timeout" => Ok(Outcome::Timeout),
            other => Err(UnknownOutcome(other.to_string())),
        }
    }
}

/// Kind of user action observed while a session is open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Click,
    Focus,
    Input,
    Scroll,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Click => "click",
            InteractionKind::Focus => "focus",
            InteractionKind::Input => "input",
            InteractionKind::Scroll => "scroll",
        }
    }

    /// Only pointer actions carry coordinates and feed the last-click scalar.
    pub fn is_pointer(&self) -> bool {
        matches!(self, InteractionKind::Click)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown interaction kind: {0:?}")]
pub struct UnknownInteractionKind(pub String);

impl FromStr for InteractionKind {
    type Err = UnknownInteractionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(InteractionKind::Click),
            "focus" => Ok(InteractionKind::Focus),
            "input" => Ok(InteractionKind::Input),
            "scroll" => Ok(InteractionKind::Scroll),
            other => Err(UnknownInteractionKind(other.to_string())),
        }
    }
}
