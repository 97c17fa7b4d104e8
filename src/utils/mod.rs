// ============================================================================
// Utilities Module
// Helpers for binaries, benchmarks and tests built on this crate
// ============================================================================

mod logging;

pub use logging::init_logging;
