use std::io::{IsTerminal, Write};

use focusloop_core::{PresentationSink, TimerView};
use tracing::warn;

/// Writes each view to stdout, either as a status line or as JSON.
///
/// On a terminal the status line is redrawn in place; otherwise every view
/// gets its own line so output can be piped.
pub struct TerminalSink {
    json: bool,
    in_place: bool,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            in_place: !json && std::io::stdout().is_terminal(),
        }
    }
}

pub fn status_line(view: &TimerView) -> String {
    let state = if view.is_running { "running" } else { "paused" };
    let mut line = format!("[{}] {} · {}", view.formatted_time, view.phase_name, state);
    if view.intention_set {
        line.push_str(" · ");
        line.push_str(&view.intention);
    } else {
        line.push_str(" · no intention (type: intention <text>)");
    }
    line
}

impl PresentationSink for TerminalSink {
    fn render(&mut self, view: &TimerView) {
        let mut out = std::io::stdout().lock();
        let result = if self.json {
            match serde_json::to_string(view) {
                Ok(json) => writeln!(out, "{json}"),
                Err(e) => {
                    warn!(error = %e, "failed to serialize view");
                    return;
                }
            }
        } else if self.in_place {
            write!(out, "\r\x1b[2K{}", status_line(view)).and_then(|_| out.flush())
        } else {
            writeln!(out, "{}", status_line(view))
        };

        if let Err(e) = result {
            warn!(error = %e, "failed to render view");
        }
    }
}
