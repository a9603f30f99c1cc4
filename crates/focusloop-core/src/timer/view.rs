//! Presentation model pushed to the UI after every state change.

use serde::{Deserialize, Serialize};

use super::engine::TimerState;
use super::phase::Phase;

/// Format seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours; 6000 seconds renders as `100:00`.
pub fn format_time(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Which controls the UI should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub reset: bool,
    pub switch_phase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub formatted_time: String,
    pub phase: Phase,
    pub phase_name: String,
    pub is_running: bool,
    pub intention_set: bool,
    pub intention: String,
    pub controls: Controls,
    /// "Pause" while running, "Start" otherwise.
    pub start_label: String,
    pub switch_label: String,
    /// Window/tab title, e.g. `24:59 · Focus`.
    pub title: String,
}

impl TimerView {
    pub fn from_state(state: &TimerState) -> Self {
        let formatted_time = format_time(state.remaining_seconds);
        let intention_set = !state.intention.is_empty();
        let pristine = state.phase == Phase::Focus
            && state.remaining_seconds == Phase::Focus.duration_secs()
            && !state.is_running;

        Self {
            title: format!("{formatted_time} · {}", state.phase.label()),
            formatted_time,
            phase: state.phase,
            phase_name: state.phase.label().to_string(),
            is_running: state.is_running,
            intention_set,
            intention: state.intention.clone(),
            controls: Controls {
                start: state.is_running || intention_set,
                reset: !pristine,
                switch_phase: state.is_running || intention_set,
            },
            start_label: if state.is_running { "Pause" } else { "Start" }.to_string(),
            switch_label: state.phase.skip_label().to_string(),
        }
    }
}

/// Receives a fresh view on every state change.
pub trait PresentationSink {
    fn render(&mut self, view: &TimerView);
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn render(&mut self, view: &TimerView) {
        (**self).render(view)
    }
}

/// Discards every view.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render(&mut self, _view: &TimerView) {}
}

/// Keeps every rendered view in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub views: Vec<TimerView>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&TimerView> {
        self.views.last()
    }
}

impl PresentationSink for RecordingSink {
    fn render(&mut self, view: &TimerView) {
        self.views.push(view.clone());
    }
}
