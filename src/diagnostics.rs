//! Logging setup and error message formatting.

use tracing_subscriber::EnvFilter;

const ERROR_PREFIX: &str = "speedup-report";

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the default `warn` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("{}: {}", ERROR_PREFIX, msg.as_ref())
}
