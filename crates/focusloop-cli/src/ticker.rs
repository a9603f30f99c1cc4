//! Tick source backed by tokio intervals.
//!
//! Each registration spawns one task that sends its handle over a channel
//! every interval. The session loop forwards a tick to the engine only when
//! the handle matches the one the engine currently holds, so messages
//! already queued by a cancelled registration are dropped.

use std::collections::HashMap;
use std::time::Duration;

use focusloop_core::{TickHandle, TickSource};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

pub struct TokioTickSource {
    tx: UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTickSource {
    pub fn new(tx: UnboundedSender<TickHandle>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }
}

impl TickSource for TokioTickSource {
    fn register_periodic(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            // First tick one full period from now, not immediately.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!(%handle, "tick source registered");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!(%handle, "tick source cancelled");
        }
    }
}

impl Drop for TokioTickSource {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
