//! Logging setup for the `grubconf` binary.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Identifier attached to journal entries.
const SYSLOG_IDENTIFIER: &str = "grubconf";

/// Initialize tracing.
///
/// Diagnostics go to stderr, filtered by `RUST_LOG` and showing warnings
/// and above when it is unset; stdout carries command output only.  When
/// running as root, writes of the configuration file (`info` and above)
/// are also recorded in the journal.
pub fn initialize_tracing() {
    let stderr_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(
            tracing_subscriber::fmt::format()
                .without_time()
                .with_target(false)
                .compact(),
        )
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    // No journal (e.g. in a container) is not an error.
    let journal_layer = rustix::process::getuid()
        .is_root()
        .then(tracing_journald::layer)
        .and_then(Result::ok)
        .map(|layer| {
            layer
                .with_syslog_identifier(SYSLOG_IDENTIFIER.to_owned())
                .with_filter(LevelFilter::INFO)
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(journal_layer)
        .init();
}
