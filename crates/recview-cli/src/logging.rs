//! Diagnostics go to stderr through `tracing`, filtered by `--log-level`.
//! `RUST_LOG` overrides the flag when set.

use crate::types::LogLevel;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Used while the terminal UI owns the screen.
    Discard,
}

pub fn init(level: LogLevel, sink: LogSink) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .compact();

    // A subscriber may already be installed when embedded in tests.
    let _ = match sink {
        LogSink::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stderr))
            .try_init(),
        LogSink::Discard => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::sink))
            .try_init(),
    };
}
