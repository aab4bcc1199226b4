//! Tracing setup of the command-line tool.
//!
//! Diagnostics go to stderr; stdout is left to the reconstruction tool.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn`, or `info` if `verbose` is set.
///
/// # Example
/// ```bash
/// RUST_LOG=ancestree=debug ancestree --alignment snps.aln --tree snps.tre ...
/// ```
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
