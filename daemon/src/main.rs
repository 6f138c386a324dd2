//! Ballot daemon: entry point for running an in-memory voting ledger.

mod config;
mod shell;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ballot_governance::SystemClock;
use ballot_utils::init_logging;
use clap::Parser;

use crate::config::DaemonConfig;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "ballot-daemon", about = "Time-boxed binary proposal ledger")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<String>,

    /// Print ledger events ahead of each command's response.
    #[arg(long, env = "BALLOT_EMIT_EVENTS")]
    emit_events: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Read commands from stdin and answer each with one JSON line on stdout.
    Shell,
    /// Print the effective configuration as TOML and exit.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.emit_events |= cli.emit_events;
    config.validate().context("invalid configuration")?;

    init_logging(config.log_format()?, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Shell => {
            tracing::info!(
                max_description_len = config.limits.max_description_len,
                max_batch = config.limits.max_batch,
                emit_events = config.emit_events,
                "starting ballot shell"
            );
            let shell = Shell::new(Arc::new(SystemClock), config.limits, config.emit_events);
            shell
                .run(io::stdin().lock(), io::stdout().lock())
                .context("shell I/O failed")?;
            tracing::info!(
                proposals = shell.ledger().proposal_count(),
                "input closed, ballot shell exiting"
            );
        }
    }

    Ok(())
}
