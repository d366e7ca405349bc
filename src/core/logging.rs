//! Logging setup shared by both binaries.
//!
//! Logs always go to stderr; stdout is reserved for results and the
//! `PORT:<port>` handshake.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use super::config::LoggingConfig;

/// Map a textual level onto a tracing level, defaulting to `INFO`.
pub fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format. `RUST_LOG`
/// directives are honoured on top of the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let level = parse_level(&config.level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    // A second initialization (tests, embedding) is not an error.
    let _ = if config.with_timestamps {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
}
