//! Tracing setup for the two Unredactor binaries.
//!
//! The HTTP server logs batch activity to stdout and mirrors it into a log file
//! (`UNREDACTOR_LOG_FILE`, or `logs/unredactor.log` when unset) through a non-blocking appender,
//! so extraction workers never wait on file I/O. The command-line tool keeps stdout for its JSON
//! output: it logs to stderr only and stays quiet below `warn` unless `--verbose` is given.
//! Both honour `RUST_LOG`.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "UNREDACTOR_LOG_FILE";
const LOG_DIR: &str = "logs";
const LOG_FILE_NAME: &str = "unredactor.log";

/// Keeps the file appender's worker alive until the server exits.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the server subscriber: compact stdout plus the log file when it can be opened.
pub fn init_tracing() {
    let file_layer = open_log_file().map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter_or("info"))
        .with(fmt::layer().with_target(false).compact())
        .with(file_layer)
        .init();
}

/// Install the command-line subscriber, writing to stderr so stdout carries only results.
pub fn init_cli_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(filter_or(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Open the server log file. Problems are reported on stderr and disable file logging only.
fn open_log_file() -> Option<NonBlocking> {
    let (writer, guard) = match std::env::var(LOG_FILE_ENV) {
        Ok(path) => {
            let opened = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path);
            match opened {
                Ok(file) => tracing_appender::non_blocking(file),
                Err(err) => {
                    eprintln!("Failed to open log file {path}: {err}");
                    return None;
                }
            }
        }
        Err(_) => {
            if let Err(err) = std::fs::create_dir_all(LOG_DIR) {
                eprintln!("Failed to create {LOG_DIR} directory: {err}");
                return None;
            }
            tracing_appender::non_blocking(tracing_appender::rolling::never(LOG_DIR, LOG_FILE_NAME))
        }
    };
    let _ = FILE_GUARD.set(guard);
    Some(writer)
}
