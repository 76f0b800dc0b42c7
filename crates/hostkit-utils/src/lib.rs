//! # hostkit Utilities
//!
//! Shared utilities for the hostkit workspace.
//!
//! Today this is the logging setup built on `tracing`; the core library only
//! emits events and leaves installing a subscriber to the binary.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    init_logging, init_logging_with, init_logging_with_level, LogConfig, LogFormat, LogLevel, LoggingError,
    LoggingGuard,
};
pub use tracing::{debug, error, info, trace, warn};
