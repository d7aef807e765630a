//! Diagnostic tracing for the launcher.
//!
//! Stdout belongs to the delegated compose output and the completion line,
//! so all tracing goes to stderr. At the default `warn` level only a failed,
//! timed out, unstarted or unreaped compose call is reported, along with any
//! ignored `pgup.toml`. `debug` adds the resolved launcher directory, the
//! descriptor path and whether it exists, and the exact argv handed to the
//! tool.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset or unparseable.
///
/// # Example
/// ```bash
/// RUST_LOG=pgup=debug ./pgup
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
