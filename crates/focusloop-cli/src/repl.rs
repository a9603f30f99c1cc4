//! Commands typed into a running session, one per line.

use std::io::Write;

use clap::{CommandFactory, Parser, Subcommand};
use focusloop_core::{Announcer, Phase, PresentationSink, TickSource, TimerEngine};
use tracing::debug;

const INTENTION_PROMPT: &str = "Set an intention first: intention <what you are working on>";

#[derive(Parser, Debug)]
#[command(
    name = "focusloop",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum LineCommand {
    /// Set what this session is for and start the timer
    #[command(visible_alias = "i")]
    Intention {
        /// What you are working on, taken verbatim from the rest of the line
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,
    },
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    #[command(visible_alias = "t")]
    Toggle,
    /// Back to a fresh focus phase and clear the intention
    Reset,
    /// Skip to the other phase
    #[command(visible_alias = "s")]
    Skip,
    /// Jump to a full break, keeping the run state
    Break,
    /// Jump to a full focus phase, keeping the run state
    Focus,
    /// Redraw the timer
    Refresh,
    /// Print the timer state as JSON
    Status,
    /// Show this help
    Help,
    /// End the session
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// The intention keeps the rest of the line as typed, minus surrounding
/// whitespace; every other command is tokenized by clap.
pub fn parse(line: &str) -> Result<Option<LineCommand>, clap::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match Line::try_parse_from([word])?.command {
        LineCommand::Intention { .. } => Ok(Some(LineCommand::Intention {
            text: rest.trim().to_string(),
        })),
        _ => Line::try_parse_from(line.split_whitespace()).map(|l| Some(l.command)),
    }
}

pub fn help_text() -> String {
    Line::command().render_help().to_string()
}

/// Apply one command to the engine, writing any user-facing reply to `out`.
pub fn dispatch<T, A, S, W>(
    engine: &mut TimerEngine<T, A, S>,
    command: LineCommand,
    out: &mut W,
) -> Result<Flow, Box<dyn std::error::Error>>
where
    T: TickSource,
    A: Announcer,
    S: PresentationSink,
    W: Write,
{
    debug!(?command, "dispatching");
    match command {
        LineCommand::Intention { text } => {
            // Re-prompt without calling into the engine.
            if text.trim().is_empty() {
                writeln!(out, "{INTENTION_PROMPT}")?;
                return Ok(Flow::Continue);
            }
            if let Err(e) = engine.set_intention(&text) {
                writeln!(out, "{e}. {INTENTION_PROMPT}")?;
            }
        }
        LineCommand::Start => {
            if engine.start().is_none() && engine.intention().is_empty() {
                writeln!(out, "{INTENTION_PROMPT}")?;
            }
        }
        LineCommand::Pause => {
            engine.pause();
        }
        LineCommand::Toggle => {
            if engine.toggle().is_none() && engine.intention().is_empty() {
                writeln!(out, "{INTENTION_PROMPT}")?;
            }
        }
        LineCommand::Reset => {
            engine.reset();
            writeln!(out, "Reset. {INTENTION_PROMPT}")?;
        }
        LineCommand::Skip => {
            engine.skip();
        }
        LineCommand::Break => {
            engine.switch_phase(Some(Phase::Break), None);
        }
        LineCommand::Focus => {
            engine.switch_phase(Some(Phase::Focus), None);
        }
        LineCommand::Refresh => engine.refresh(),
        LineCommand::Status => {
            writeln!(out, "{}", serde_json::to_string_pretty(engine.state())?)?;
        }
        LineCommand::Help => {
            writeln!(out, "{}", help_text())?;
        }
        LineCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
