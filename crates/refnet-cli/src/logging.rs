//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the level follows `-v` count,
//! starting at `warn`. Logs go to stderr so stdout stays parseable.

use tracing_subscriber::{fmt, EnvFilter};

/// Default directive for a given `-v` count
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
