//! Console status output through `tracing`
//!
//! Stage milestones and soft failures are emitted as tracing events by
//! [`crate::pipeline::events::TracingSink`]; this module only installs the subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber
///
/// Reads `RUST_LOG`. Without it, milestones are shown at `info`, or only
/// failures at `warn` when `quiet` is set. Output goes to stderr in compact form.
/// Calling this twice is harmless; the second registration is ignored.
pub fn init(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
