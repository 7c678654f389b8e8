//! Diagnostics setup

use tracing_subscriber::EnvFilter;

/// Send `tracing` output to stderr, `warn` and above unless `RUST_LOG` says otherwise
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
