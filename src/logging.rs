//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "solar_pump_sim=debug,info" } else { "warn" }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to warnings only, or to debug output for this crate when
/// `verbose` is set. Calling it twice leaves the first subscriber in place.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
