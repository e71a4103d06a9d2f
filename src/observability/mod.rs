//! Logging setup for hosts embedding the lookup providers.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host. `init_tracing` is the stderr setup used in development.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from `config.log_level`.
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
