//! Infrastructure - cold path only
//!
//! Non-matching-critical code: configuration management. Logging is
//! initialized once in main via tracing-subscriber.

pub mod config;

pub use config::{Config, ConfigError};
