pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

use tracing_subscriber::EnvFilter;

/// Install the log subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
