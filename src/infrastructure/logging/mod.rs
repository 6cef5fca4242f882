//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Console output on stderr (pretty or JSON)
//! - Optional rolling JSON log files

pub mod logger;

pub use logger::{LogFormat, LoggerImpl, RotationPolicy};
