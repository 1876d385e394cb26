//! Logging setup.
//!
//! Structured logging via the `tracing` crate. The stages emit `trace!` /
//! `debug!` / `warn!` events; an embedding pipeline host normally installs
//! its own subscriber, so this initializer is a convenience for standalone
//! use and tests. The `ASSET_REV_LOG` environment variable overrides the
//! default level with a full `EnvFilter` directive string.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "ASSET_REV_LOG";

/// Install a compact stderr subscriber at the given default level.
///
/// A subscriber installed earlier (by the host, or by a previous call) wins;
/// this is a no-op in that case.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
