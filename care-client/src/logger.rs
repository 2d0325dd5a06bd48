//! Logging Infrastructure

use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_logger_from_env`]
pub const ENV_LOG: &str = "CARE_LOG";

/// Initialize the logger at `level` (e.g. "info", "care_client=debug")
pub fn init_logger(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true)
        .try_init();
}

/// Initialize the logger from `CARE_LOG`, defaulting to "info"
pub fn init_logger_from_env() {
    let level = std::env::var(ENV_LOG).unwrap_or_else(|_| "info".to_string());
    init_logger(&level);
}
