use crate::error::{ReleaseGateError, Result};
use std::fmt;
use std::str::FromStr;

/// Purpose of one invocation, selected by the `status` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Release request intake (empty status)
    Initial,
    Success,
    Failure,
    Canceled,
}

impl Mode {
    /// Every mode, in dispatch order
    pub const ALL: [Mode; 4] = [Mode::Initial, Mode::Success, Mode::Failure, Mode::Canceled];

    /// The status label that selects this mode
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Initial => "",
            Mode::Success => "Success",
            Mode::Failure => "Failure",
            Mode::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Initial => write!(f, "Initial"),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Resolves a status string to a [Mode].
///
/// The empty string selects [Mode::Initial]. Labels are matched exactly and
/// case-sensitively; anything else is [ReleaseGateError::InvalidMode].
pub fn resolve_mode(status: &str) -> Result<Mode> {
    match status {
        "" => Ok(Mode::Initial),
        "Success" => Ok(Mode::Success),
        "Failure" => Ok(Mode::Failure),
        "Canceled" => Ok(Mode::Canceled),
        other => Err(ReleaseGateError::InvalidMode(other.to_string())),
    }
}

impl FromStr for Mode {
    type Err = ReleaseGateError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_mode(s)
    }
}
