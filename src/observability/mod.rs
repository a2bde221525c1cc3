//! Observability.
//!
//! Structured logging is the only telemetry this engine carries: every
//! pipeline stage traces what it found, and the binary initializes one
//! subscriber at startup.

mod logging;

pub use logging::{LogFormat, LoggingConfig, init};
