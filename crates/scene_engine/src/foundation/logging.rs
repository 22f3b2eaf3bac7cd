//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still overrides `level` when it is set. Calling this more than
/// once is harmless; later calls leave the first logger in place.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Initialize a logger for unit tests
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
