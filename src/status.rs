//! Activity status shown next to the agent while a turn progresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-wide activity state.
///
/// Exactly one value exists at any time, owned by the dialogue coordinator.
/// A full turn visits `Thinking`, `Working`, `Done`, and `Idle` in that
/// order; `Listening` is entered only while voice capture is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// At rest, waiting for input. Initial state.
    #[default]
    Idle,
    /// Voice capture is armed and waiting for a command.
    Listening,
    /// A submission was received and is being considered.
    Thinking,
    /// The reply is being prepared.
    Working,
    /// The reply was delivered; held briefly before returning to idle.
    Done,
}

impl ActivityStatus {
    /// Human-readable label for renderers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Listening => "Listening...",
            Self::Thinking => "Thinking...",
            Self::Working => "Working on it...",
            Self::Done => "Done!",
        }
    }

    /// Whether capture activation may move this state to `Listening`.
    /// Only the at-rest states arm listening; a turn in flight is never
    /// preempted.
    #[must_use]
    pub fn can_arm_listening(self) -> bool {
        matches!(self, Self::Idle | Self::Done)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
