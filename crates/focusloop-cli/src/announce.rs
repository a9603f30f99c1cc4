//! Announcer channels backed by external programs.

use std::io::ErrorKind;
use std::process::Stdio;

use focusloop_core::{AnnounceError, Announcer, ChainAnnouncer, Config, LogAnnouncer};
use tokio::process::Command;
use tracing::debug;

/// Runs `program <message>` in the background.
///
/// Must be called inside a tokio runtime. The child handle is dropped right
/// away and tokio reaps the process once it exits, so announcing never
/// blocks the session loop.
pub struct CommandAnnouncer {
    channel: String,
    program: String,
}

impl CommandAnnouncer {
    pub fn new(channel: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            program: program.into(),
        }
    }
}

impl Announcer for CommandAnnouncer {
    fn channel(&self) -> &str {
        &self.channel
    }

    fn announce(&mut self, message: &str) -> Result<(), AnnounceError> {
        if self.program.trim().is_empty() {
            return Err(AnnounceError::Unavailable {
                channel: self.channel.clone(),
            });
        }

        let child = Command::new(&self.program)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match child {
            Ok(child) => {
                debug!(
                    channel = %self.channel,
                    program = %self.program,
                    pid = ?child.id(),
                    "announcement dispatched"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AnnounceError::Unavailable {
                channel: self.channel.clone(),
            }),
            Err(e) => Err(AnnounceError::Failed {
                channel: self.channel.clone(),
                message: e.to_string(),
            }),
        }
    }
}

/// Notification, then speech, then the log, as enabled in `config`.
pub fn from_config(config: &Config) -> ChainAnnouncer {
    let mut chain = ChainAnnouncer::new();
    if config.notifications.enabled {
        chain.push(Box::new(CommandAnnouncer::new(
            "notification",
            config.notifications.command.clone(),
        )));
    }
    if config.speech.enabled {
        chain.push(Box::new(CommandAnnouncer::new(
            "speech",
            config.speech.command.clone(),
        )));
    }
    chain.push(Box::new(LogAnnouncer));
    chain
}
