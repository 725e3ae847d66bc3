//! Logging infrastructure.
//!
//! Diagnostics (as opposed to user-facing notices, which go through
//! [`crate::output`]) are emitted via `tracing` and written to stderr.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Defaults to `info` level for this crate, or `debug` when `verbose` is
/// set; `RUST_LOG` takes precedence over both. Safe to call more than once;
/// later calls are no-ops.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "pdftray=debug"
    } else {
        "pdftray=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
