use std::path::PathBuf;

use clap::{Parser, Subcommand};
use focusloop_core::Config;
use tracing_subscriber::EnvFilter;

mod announce;
mod commands;
mod render;
mod repl;
mod ticker;

#[derive(Parser)]
#[command(name = "focusloop", version, about = "Focus/break timer for the terminal")]
struct Cli {
    /// Config file (defaults to ~/.config/focusloop/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "focusloop_core=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    // Without a subcommand, an interactive session starts.
    #[command(flatten)]
    run: commands::run::RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;
    init_tracing(cli.log_level.as_deref(), &config)?;

    match cli.command {
        Some(Commands::Config { action }) => commands::config::run(action, &config_path, config),
        None => commands::run::run(cli.run, &config),
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file.
fn init_tracing(cli_level: Option<&str>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&config.log.level)?,
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
