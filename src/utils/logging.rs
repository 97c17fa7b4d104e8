// ============================================================================
// Logging Setup
// tracing subscriber for binaries and benchmarks
// ============================================================================
//
// The library itself only emits events:
// - trace: a computation left the 128-bit fast path
// - debug: binary data was rejected
// - info:  the default configuration was replaced

use tracing::Level;

/// Installs a formatting subscriber that prints events up to `level`.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
}
