use serde::{Deserialize, Serialize};

/// Focus length in seconds (25 minutes).
pub const FOCUS_SECS: u64 = 25 * 60;
/// Break length in seconds (5 minutes).
pub const BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Focus,
    Break,
}

impl Phase {
    /// Fixed duration of this phase in seconds.
    pub fn duration_secs(self) -> u64 {
        match self {
            Phase::Focus => FOCUS_SECS,
            Phase::Break => BREAK_SECS,
        }
    }

    /// The other phase.
    pub fn toggled(self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    /// Display name shown next to the clock.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }

    /// Message announced when this phase runs out.
    pub fn completion_message(self) -> &'static str {
        match self {
            Phase::Focus => "Break time!",
            Phase::Break => "Back to focus.",
        }
    }

    /// Message announced when the user skips into this phase while running.
    pub fn entered_message(self) -> &'static str {
        match self {
            Phase::Focus => "Focus resumed",
            Phase::Break => "Break started",
        }
    }

    /// Label of the control that skips out of this phase.
    pub fn skip_label(self) -> &'static str {
        match self {
            Phase::Focus => "Skip to Break",
            Phase::Break => "Skip to Focus",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
