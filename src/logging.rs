//! Tracing subscriber setup.
//!
//! Logs go to stderr so `play` can write artwork to stdout untouched.
//! `RUST_LOG` takes precedence over the `-v` flags.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default level for a given number of `-v` flags.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the subscriber without installing it.
pub fn build_subscriber(verbosity: u8) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

/// Install the global subscriber.
///
/// Does nothing if one is already installed.
pub fn init(verbosity: u8) {
    let _ = tracing::subscriber::set_global_default(build_subscriber(verbosity));
}
