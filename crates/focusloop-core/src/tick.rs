//! Periodic tick sources.
//!
//! The engine never sleeps or spawns anything itself. It asks a
//! [`TickSource`] for a periodic registration while running and cancels it
//! whenever the run state or phase changes. Whoever owns the source is
//! responsible for calling [`TimerEngine::on_tick`](crate::TimerEngine::on_tick)
//! once per interval for the handle the engine currently holds.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval the engine registers with.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Opaque id of one periodic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

impl std::fmt::Display for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Scheduler capability consumed by the engine.
pub trait TickSource {
    /// Begin firing every `interval` until cancelled.
    fn register_periodic(&mut self, interval: Duration) -> TickHandle;

    /// Stop a registration. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

/// A tick source that only keeps books; the caller delivers ticks by hand.
///
/// Used by tests and by headless drivers that advance time themselves.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    next_id: u64,
    active: BTreeSet<TickHandle>,
    registrations: usize,
    cancellations: usize,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations not yet cancelled.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.active.contains(&handle)
    }

    /// Total registrations ever made.
    pub fn registrations(&self) -> usize {
        self.registrations
    }

    /// Total cancellations of live handles.
    pub fn cancellations(&self) -> usize {
        self.cancellations
    }
}

impl TickSource for ManualTickSource {
    fn register_periodic(&mut self, _interval: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.active.insert(handle);
        self.registrations += 1;
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.active.remove(&handle) {
            self.cancellations += 1;
        }
    }
}

impl<T: TickSource + ?Sized> TickSource for Box<T> {
    fn register_periodic(&mut self, interval: Duration) -> TickHandle {
        (**self).register_periodic(interval)
    }

    fn cancel(&mut self, handle: TickHandle) {
        (**self).cancel(handle)
    }
}
