//! Log output for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `gridlink_core=debug`.
pub const LOG_ENV: &str = "GRIDLINK_LOG";

/// Install a stderr subscriber. `GRIDLINK_LOG` wins over the configured level.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Warning: logging disabled: {}", err);
    }
}
