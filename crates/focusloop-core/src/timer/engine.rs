//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine over two orthogonal axes,
//! `phase ∈ {Focus, Break}` and `running ∈ {true, false}`, gated by a
//! non-empty intention. It does not own a clock: while running it holds one
//! registration with a [`TickSource`], and whoever drives that source calls
//! [`TimerEngine::on_tick`] once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle (no intention) --set_intention--> Running(Focus)
//! Running(p) --pause--> Paused(p) --start--> Running(p)
//! Running(p) --countdown hits 0--> Running(toggle p)
//! any --reset--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(ManualTickSource::new(), LogAnnouncer, NullSink);
//! engine.set_intention("write paper")?;
//! // Once per second:
//! engine.on_tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::Phase;
use super::view::{PresentationSink, TimerView};
use crate::announce::Announcer;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::tick::{TickHandle, TickSource, TICK_INTERVAL};

/// The single mutable record the engine owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// Always within `0..=phase.duration_secs()`.
    pub remaining_seconds: u64,
    pub is_running: bool,
    /// Empty means "not set".
    pub intention: String,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: Phase::Focus,
            remaining_seconds: Phase::Focus.duration_secs(),
            is_running: false,
            intention: String::new(),
        }
    }
}

/// Core timer engine.
///
/// Generic over its collaborators so the same logic runs under a tokio
/// interval, a test harness, or anything else that can call `on_tick()`.
pub struct TimerEngine<T, A, S> {
    state: TimerState,
    /// Held iff `state.is_running`.
    tick_handle: Option<TickHandle>,
    ticks: T,
    announcer: A,
    sink: S,
}

impl<T, A, S> TimerEngine<T, A, S>
where
    T: TickSource,
    A: Announcer,
    S: PresentationSink,
{
    /// Create an engine in the initial state: Focus, full duration, not
    /// running, no intention.
    pub fn new(ticks: T, announcer: A, sink: S) -> Self {
        Self {
            state: TimerState::default(),
            tick_handle: None,
            ticks,
            announcer,
            sink,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn intention(&self) -> &str {
        &self.state.intention
    }

    /// The registration ticks must come from; `None` while not running.
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.tick_handle
    }

    pub fn view(&self) -> TimerView {
        TimerView::from_state(&self.state)
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. No-op when already running or when no
    /// intention has been set.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running {
            return None;
        }
        if self.state.intention.is_empty() {
            debug!("start ignored: no intention set");
            return None;
        }

        self.clear_tick();
        self.state.is_running = true;
        self.arm_tick();
        debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer started");
        self.render();

        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Stop counting down, keeping the remaining time. No-op when not
    /// running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }

        self.state.is_running = false;
        self.clear_tick();
        debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer paused");
        self.render();

        Some(Event::TimerPaused {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Start/pause button: pause if running, otherwise start.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to the initial state, intention included.
    pub fn reset(&mut self) -> Event {
        self.clear_tick();
        self.state = TimerState::default();
        debug!("timer reset");
        self.render();
        Event::TimerReset { at: Utc::now() }
    }

    /// Store a trimmed intention and start the timer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIntention`] if `text` is blank after
    /// trimming. State is left untouched in that case.
    pub fn set_intention(&mut self, text: &str) -> Result<Event> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidIntention);
        }

        self.state.intention = trimmed.to_string();
        info!(intention = trimmed, "intention set");
        let started = self.start().is_some();
        if !started {
            self.render();
        }

        Ok(Event::IntentionSet {
            intention: self.state.intention.clone(),
            started,
            at: Utc::now(),
        })
    }

    /// Move to `target` with a full countdown.
    ///
    /// - `target`: `None` means the other phase.
    /// - `auto_start`: `None` means keep the current run state. Running
    ///   still requires an intention; without one the engine stays paused.
    pub fn switch_phase(&mut self, target: Option<Phase>, auto_start: Option<bool>) -> Event {
        let from = self.state.phase;
        let to = target.unwrap_or_else(|| from.toggled());
        let run = auto_start.unwrap_or(self.state.is_running) && !self.state.intention.is_empty();

        self.clear_tick();
        self.state.phase = to;
        self.state.remaining_seconds = to.duration_secs();
        self.state.is_running = run;
        if run {
            self.arm_tick();
        }
        debug!(%from, %to, running = run, "phase switched");
        self.render();

        Event::PhaseSwitched {
            from,
            to,
            running: run,
            at: Utc::now(),
        }
    }

    /// "Skip to Break/Focus" button: toggle the phase keeping the run
    /// state, announcing the new phase if the timer keeps running.
    pub fn skip(&mut self) -> Event {
        let event = self.switch_phase(None, None);
        if self.state.is_running {
            self.announce(self.state.phase.entered_message());
        }
        event
    }

    /// Advance the countdown by one second. No-op when not running.
    ///
    /// A phase never sits at zero: the tick that reaches zero also rolls
    /// over into the next phase.
    pub fn on_tick(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }

        if self.state.remaining_seconds == 0 {
            return Some(self.complete_phase());
        }

        self.state.remaining_seconds -= 1;
        self.render();

        if self.state.remaining_seconds == 0 {
            return Some(self.complete_phase());
        }

        Some(Event::Ticked {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Re-render without touching state. Used when the UI regains
    /// visibility.
    pub fn refresh(&mut self) {
        self.render();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let finished = self.state.phase;
        let next = finished.toggled();
        info!(%finished, %next, "phase completed");
        self.announce(finished.completion_message());
        self.switch_phase(Some(next), Some(true));

        Event::PhaseCompleted {
            finished,
            next,
            at: Utc::now(),
        }
    }

    fn announce(&mut self, message: &str) {
        if let Err(e) = self.announcer.announce(message) {
            warn!(channel = self.announcer.channel(), error = %e, "announcement dropped");
        }
    }

    fn clear_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.ticks.cancel(handle);
        }
    }

    fn arm_tick(&mut self) {
        debug_assert!(self.tick_handle.is_none(), "tick source already registered");
        self.tick_handle = Some(self.ticks.register_periodic(TICK_INTERVAL));
    }

    fn render(&mut self) {
        let view = TimerView::from_state(&self.state);
        self.sink.render(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::RecordingAnnouncer;
    use crate::tick::ManualTickSource;
    use crate::timer::view::RecordingSink;

    type TestEngine = TimerEngine<ManualTickSource, RecordingAnnouncer, RecordingSink>;

    fn engine() -> TestEngine {
        TimerEngine::new(
            ManualTickSource::new(),
            RecordingAnnouncer::new(),
            RecordingSink::new(),
        )
    }

    fn tick_n(engine: &mut TestEngine, n: u64) {
        for _ in 0..n {
            engine.on_tick();
        }
    }

    #[test]
    fn starts_in_initial_state() {
        let engine = engine();
        assert_eq!(engine.state(), &TimerState::default());
        assert_eq!(engine.remaining_seconds(), 1500);
        assert!(engine.tick_handle().is_none());
    }

    #[test]
    fn start_without_intention_is_noop() {
        let mut engine = engine();
        assert!(engine.start().is_none());
        assert!(!engine.is_running());
        assert_eq!(engine.tick_source().registrations(), 0);
    }

    #[test]
    fn set_intention_auto_starts() {
        let mut engine = engine();
        let event = engine.set_intention("  write paper ").unwrap();
        assert!(matches!(event, Event::IntentionSet { started: true, .. }));
        assert_eq!(engine.intention(), "write paper");
        assert!(engine.is_running());
        assert_eq!(engine.tick_source().active_count(), 1);
    }

    #[test]
    fn set_intention_renders_once() {
        let mut engine = engine();
        engine.set_intention("write paper").unwrap();
        assert_eq!(engine.sink().views.len(), 1);
        assert!(engine.sink().last().unwrap().is_running);

        // Already running: the new intention still reaches the sink.
        engine.set_intention("review").unwrap();
        assert_eq!(engine.sink().views.len(), 2);
        assert_eq!(engine.sink().last().unwrap().intention, "review");
    }

    #[test]
    fn blank_intention_is_rejected_without_mutation() {
        let mut engine = engine();
        let err = engine.set_intention(" \t ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidIntention));
        assert_eq!(engine.state(), &TimerState::default());
        assert!(engine.sink().views.is_empty());
    }

    #[test]
    fn repeated_start_registers_once() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        assert!(engine.start().is_none());
        assert!(engine.start().is_none());
        assert_eq!(engine.tick_source().registrations(), 1);
    }

    #[test]
    fn pause_when_paused_is_noop() {
        let mut engine = engine();
        assert!(engine.pause().is_none());
    }

    #[test]
    fn pause_then_start_keeps_remaining() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        tick_n(&mut engine, 42);
        engine.pause();
        assert_eq!(engine.remaining_seconds(), 1458);
        assert!(engine.tick_handle().is_none());
        // Ticks while paused are ignored.
        tick_n(&mut engine, 5);
        assert_eq!(engine.remaining_seconds(), 1458);
        engine.start();
        assert_eq!(engine.remaining_seconds(), 1458);
        engine.on_tick();
        assert_eq!(engine.remaining_seconds(), 1457);
    }

    #[test]
    fn toggle_flips_run_state() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        assert!(matches!(engine.toggle(), Some(Event::TimerPaused { .. })));
        assert!(matches!(engine.toggle(), Some(Event::TimerStarted { .. })));
    }

    #[test]
    fn focus_completion_rolls_into_running_break() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        tick_n(&mut engine, 1499);
        assert_eq!(engine.remaining_seconds(), 1);

        let event = engine.on_tick();
        assert!(matches!(
            event,
            Some(Event::PhaseCompleted {
                finished: Phase::Focus,
                next: Phase::Break,
                ..
            })
        ));
        assert_eq!(engine.announcer().last(), Some("Break time!"));
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 300);
        assert!(engine.is_running());
        assert_eq!(engine.tick_source().active_count(), 1);
    }

    #[test]
    fn break_completion_announces_back_to_focus() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        engine.switch_phase(Some(Phase::Break), None);
        tick_n(&mut engine, 300);
        assert_eq!(engine.announcer().last(), Some("Back to focus."));
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_seconds(), 1500);
    }

    #[test]
    fn switch_phase_while_paused_stays_paused() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        tick_n(&mut engine, 900);
        engine.pause();
        assert_eq!(engine.remaining_seconds(), 600);

        engine.switch_phase(None, Some(false));
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 300);
        assert!(!engine.is_running());
        assert_eq!(engine.tick_source().active_count(), 0);
    }

    #[test]
    fn switch_phase_cannot_run_without_intention() {
        let mut engine = engine();
        let event = engine.switch_phase(None, Some(true));
        assert!(matches!(event, Event::PhaseSwitched { running: false, .. }));
        assert!(!engine.is_running());
        assert!(engine.tick_handle().is_none());
    }

    #[test]
    fn switch_phase_reregisters_exactly_once() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        let first = engine.tick_handle().unwrap();
        engine.switch_phase(None, None);
        let second = engine.tick_handle().unwrap();
        assert_ne!(first, second);
        assert!(!engine.tick_source().is_active(first));
        assert_eq!(engine.tick_source().active_count(), 1);
    }

    #[test]
    fn skip_announces_only_when_running() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        engine.skip();
        assert_eq!(engine.announcer().last(), Some("Break started"));
        engine.skip();
        assert_eq!(engine.announcer().last(), Some("Focus resumed"));

        engine.pause();
        let before = engine.announcer().messages.len();
        engine.skip();
        assert_eq!(engine.announcer().messages.len(), before);
    }

    #[test]
    fn reset_from_anywhere_restores_initial_state() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        engine.switch_phase(Some(Phase::Break), None);
        tick_n(&mut engine, 17);
        engine.reset();
        assert_eq!(engine.state(), &TimerState::default());
        assert_eq!(engine.tick_source().active_count(), 0);
        assert!(engine.start().is_none());
    }

    #[test]
    fn announcer_failure_does_not_corrupt_state() {
        let mut engine = TimerEngine::new(
            ManualTickSource::new(),
            RecordingAnnouncer::failing(),
            RecordingSink::new(),
        );
        engine.set_intention("x").unwrap();
        tick_n(&mut engine, 1500);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 300);
        assert!(engine.is_running());
    }

    #[test]
    fn refresh_renders_without_mutation() {
        let mut engine = engine();
        let before = engine.state().clone();
        engine.refresh();
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.sink().last().unwrap().formatted_time, "25:00");
    }

    #[test]
    fn every_tick_renders() {
        let mut engine = engine();
        engine.set_intention("x").unwrap();
        let rendered = engine.sink().views.len();
        engine.on_tick();
        assert_eq!(engine.sink().views.len(), rendered + 1);
        assert_eq!(engine.sink().last().unwrap().formatted_time, "24:59");
    }
}
