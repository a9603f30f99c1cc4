//! The interactive session: stdin commands and tokio ticks feeding one
//! engine on a single thread.

use std::io::{ErrorKind, Write};

use clap::Args;
use focusloop_core::{Announcer, Config, PresentationSink, TickHandle, TickSource, TimerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::announce;
use crate::render::TerminalSink;
use crate::repl::{self, Flow};
use crate::ticker::TokioTickSource;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Set an intention right away (starts the timer)
    #[arg(long)]
    pub intention: Option<String>,
    /// Render views as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(args, config));
    // Stdin reads cannot be cancelled; don't wait on them.
    runtime.shutdown_background();
    result
}

async fn session(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut ticks) = mpsc::unbounded_channel();
    let json = args.json || config.display.json;
    let mut engine = TimerEngine::new(
        TokioTickSource::new(tx),
        announce::from_config(config),
        TerminalSink::new(json),
    );
    info!(json, "session started");
    engine.refresh();

    if let Some(text) = args.intention.as_deref() {
        if let Err(e) = engine.set_intention(text) {
            warn!(error = %e, "ignoring --intention");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("stdin closed");
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        warn!(error = %e, "skipping unreadable input line");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                match repl::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => {
                        if repl::dispatch(&mut engine, command, &mut stdout)? == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => {
                        writeln!(stdout, "{}", e.render())?;
                    }
                }
            }
            Some(handle) = ticks.recv() => {
                deliver_tick(&mut engine, handle);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    engine.pause();
    info!("session ended");
    Ok(())
}

/// Forward a tick to the engine. Ticks from a registration the engine no
/// longer holds are dropped; returns whether the tick was delivered.
fn deliver_tick<T, A, S>(engine: &mut TimerEngine<T, A, S>, handle: TickHandle) -> bool
where
    T: TickSource,
    A: Announcer,
    S: PresentationSink,
{
    if engine.tick_handle() != Some(handle) {
        debug!(%handle, "dropping stale tick");
        return false;
    }
    if let Some(event) = engine.on_tick() {
        debug!(kind = event.kind(), "tick");
    }
    true
}
