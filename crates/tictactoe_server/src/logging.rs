//! Tracing subscriber setup.
//!
//! Everything goes to stderr. The server also keeps one log file per day,
//! `tictactoe.YYYY-MM-DD.log`, in its configured log directory.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the interactive front ends, which own stdout.
pub const QUIET_FILTER: &str = "warn";

/// Filter for `client` and `play`: `RUST_LOG` when set, else [`QUIET_FILTER`].
pub fn interactive_filter() -> String {
    interactive_filter_with(|key| std::env::var(key).ok())
}

/// [`interactive_filter`] over an arbitrary variable lookup.
pub fn interactive_filter_with(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("RUST_LOG")
        .filter(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| QUIET_FILTER.to_string())
}

/// Opens the daily rolling log file in `dir`, creating the directory.
pub fn daily_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log dir {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tictactoe")
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}

/// Installs the global subscriber.
///
/// `filter` is an `EnvFilter` directive such as `info,tictactoe_server=debug`;
/// an unparsable directive falls back to `info`. With a `log_dir`, events
/// are also written to the daily file there. If that file cannot be opened
/// logging continues on stderr alone.
pub fn init(filter: &str, log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let (file_layer, file_error) = match log_dir.map(daily_appender) {
        Some(Ok(appender)) => (Some(fmt::layer().with_ansi(false).with_writer(appender)), None),
        Some(Err(error)) => (None, Some(error)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(error) = file_error {
        tracing::warn!(error = %format!("{:#}", error), "File logging disabled");
    }
    tracing::debug!(filter, log_dir = ?log_dir, "Logging initialized");
}
