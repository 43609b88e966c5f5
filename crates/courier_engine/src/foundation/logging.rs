//! Logging utilities
//!
//! The library only talks to the `log` facade; binaries pick a backend.

pub use log::{debug, error, info, trace, warn};

/// Initialize env_logger from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize env_logger with a default filter, still overridable by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
