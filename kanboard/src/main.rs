//! Single-board kanban task tracker.
//!
//! Runs a line-oriented shell over the board. Configuration via CLI flags,
//! environment variables, or config file (`~/.config/kanboard/config.toml`).
//!
//! ```bash
//! # Demo projects
//! cargo run --bin kanboard
//!
//! # Empty board, fixed date, exports into ./out
//! cargo run --bin kanboard -- --blank --today 2025-11-28 --export-dir out
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use kanboard::app::App;
use kanboard::config::{BoardConfig, CliArgs};
use kanboard::shell;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // CLI args > env > config file > defaults.
    let config = match BoardConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            BoardConfig::default()
        }
    };

    // Logs go to a file so they never interleave with the shell.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(demo_data = config.demo_data, "kanboard starting");

    let store = config.initial_store();
    let mut app = App::new(store).with_activity_capacity(config.activity_capacity);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = shell::run(&mut app, &config.export_dir, stdin.lock(), stdout.lock());

    tracing::info!("kanboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("kanboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
