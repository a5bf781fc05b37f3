//! Logging setup for the CLI.
//!
//! Matches go to stdout; diagnostics go to stderr through `tracing`, so the
//! two never interleave. The default level is `warn` to keep a clean run
//! silent; `RUST_LOG` overrides it.

use tracing_subscriber::EnvFilter;

/// Initialise stderr logging. Call once at startup.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
