//! Best-effort user notifications.
//!
//! The engine only decides *when* to announce and *what* to say. Channels
//! (desktop notification, speech, log) live behind [`Announcer`] and may
//! fail freely; the engine logs and drops their errors.

use tracing::{debug, info};

use crate::error::AnnounceError;

/// A single-method notification capability.
pub trait Announcer {
    /// Short identifier used in logs (e.g. "log", "speech").
    fn channel(&self) -> &str;

    /// Deliver `message` to the user. Must not block.
    fn announce(&mut self, message: &str) -> Result<(), AnnounceError>;
}

impl<A: Announcer + ?Sized> Announcer for Box<A> {
    fn channel(&self) -> &str {
        (**self).channel()
    }

    fn announce(&mut self, message: &str) -> Result<(), AnnounceError> {
        (**self).announce(message)
    }
}

/// Writes announcements to the tracing log. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn channel(&self) -> &str {
        "log"
    }

    fn announce(&mut self, message: &str) -> Result<(), AnnounceError> {
        info!(target: "focusloop::announce", "{message}");
        Ok(())
    }
}

/// Tries each channel in order until one succeeds.
#[derive(Default)]
pub struct ChainAnnouncer {
    channels: Vec<Box<dyn Announcer>>,
}

impl ChainAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fallback channel.
    pub fn with(mut self, channel: impl Announcer + 'static) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    pub fn push(&mut self, channel: Box<dyn Announcer>) {
        self.channels.push(channel);
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.channel()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Announcer for ChainAnnouncer {
    fn channel(&self) -> &str {
        "chain"
    }

    fn announce(&mut self, message: &str) -> Result<(), AnnounceError> {
        let mut last_err = None;
        for channel in &mut self.channels {
            match channel.announce(message) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!(channel = channel.channel(), error = %e, "falling back to next channel");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| AnnounceError::Unavailable {
            channel: "chain".into(),
        }))
    }
}

/// Keeps every message in memory. Optionally fails every call after
/// recording, to exercise error suppression.
#[derive(Debug, Default, Clone)]
pub struct RecordingAnnouncer {
    pub messages: Vec<String>,
    pub fail: bool,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            messages: Vec::new(),
            fail: true,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Announcer for RecordingAnnouncer {
    fn channel(&self) -> &str {
        "recording"
    }

    fn announce(&mut self, message: &str) -> Result<(), AnnounceError> {
        self.messages.push(message.to_string());
        if self.fail {
            return Err(AnnounceError::Failed {
                channel: "recording".into(),
                message: "configured to fail".into(),
            });
        }
        Ok(())
    }
}
