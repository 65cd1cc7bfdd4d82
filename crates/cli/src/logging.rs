//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a console subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set. Call once, before any
/// `tracing` events are emitted.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
