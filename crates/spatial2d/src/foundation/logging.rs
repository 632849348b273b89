//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, tolerating repeated calls
///
/// Tests and embedding harnesses may both try to install a logger;
/// only the first call wins.
pub fn try_init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
