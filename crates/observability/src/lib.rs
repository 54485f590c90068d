//! Shared logging setup for billbook binaries.

/// Log output configuration (format, filters).
pub mod logging;

pub use logging::LogFormat;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
