#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging utilities for walletd-rpc.
//!
//! Library crates only emit `tracing` events. Binaries call [`init`] once
//! to install a subscriber; `RUST_LOG` overrides the configured level.

use tracing_subscriber::{fmt, EnvFilter};

/// Emits a trace event tagged with the emitting module.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module = module, "{}", msg);
}

/// Builds the filter used by [`init`].
///
/// `RUST_LOG` wins when set and valid; otherwise `level` applies to every
/// target. An unparseable `level` falls back to `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// Returns `false` if a subscriber was already installed, which is not an
/// error: tests and embedding applications may have set one up first.
pub fn init(level: &str, json: bool) -> bool {
    let builder = fmt().with_env_filter(env_filter(level)).with_writer(std::io::stderr);
    let installed = if json { builder.json().try_init() } else { builder.try_init() };
    installed.is_ok()
}
