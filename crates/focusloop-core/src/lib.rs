//! # focusloop Core Library
//!
//! Core logic for a two-phase focus/break countdown timer. Front ends (the
//! terminal CLI, tests, anything else) plug in three collaborators and call
//! commands on a single [`TimerEngine`].
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the caller invokes
//!   `on_tick()` once per second for the handle the engine holds
//! - **Tick sources**: [`TickSource`] registrations, one at a time
//! - **Announcers**: best-effort notifications with fallback chains
//! - **Presentation**: a [`TimerView`] pushed to a [`PresentationSink`] on
//!   every state change
//! - **Storage**: TOML-based configuration for the front end
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Event`]: What each command did
//! - [`Config`]: Application configuration management

pub mod announce;
pub mod error;
pub mod events;
pub mod storage;
pub mod tick;
pub mod timer;

pub use announce::{Announcer, ChainAnnouncer, LogAnnouncer, RecordingAnnouncer};
pub use error::{AnnounceError, ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use tick::{ManualTickSource, TickHandle, TickSource, TICK_INTERVAL};
pub use timer::{
    format_time, Controls, NullSink, Phase, PresentationSink, RecordingSink, TimerEngine,
    TimerState, TimerView,
};
