//! Tracing setup for the CLI

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a subscriber that writes to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug`
/// with `--verbose`. Stdout stays reserved for command output.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    // A second init in the same process is a no-op.
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
