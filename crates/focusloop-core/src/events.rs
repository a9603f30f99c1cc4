use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change the engine makes produces an Event.
/// Commands that turn out to be no-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A new intention was accepted. `started` tells whether the timer
    /// began running as a result.
    IntentionSet {
        intention: String,
        started: bool,
        at: DateTime<Utc>,
    },
    PhaseSwitched {
        from: Phase,
        to: Phase,
        running: bool,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the engine rolled into the next phase.
    PhaseCompleted {
        finished: Phase,
        next: Phase,
        at: DateTime<Utc>,
    },
    Ticked {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, for logs and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerReset { .. } => "timer_reset",
            Event::IntentionSet { .. } => "intention_set",
            Event::PhaseSwitched { .. } => "phase_switched",
            Event::PhaseCompleted { .. } => "phase_completed",
            Event::Ticked { .. } => "ticked",
        }
    }
}
