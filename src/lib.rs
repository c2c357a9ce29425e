//! Target-rate swap notification bot
//!
//! Users register a target SOL/USDC rate; a periodic poll against the
//! Jupiter quote API detects when a target is met and notifies the
//! subscribed users.
//!
//! # Architecture
//! - **core**: QuantizedRate keys and asset identity
//! - **store**: SubscriptionStore + RateIndex behind one SubscriptionBook
//! - **quote**: quote source boundary and the Jupiter HTTP client
//! - **bot**: command parsing, dispatch, notification seam
//! - **engine**: the recurring poll loop / matcher
//! - **infrastructure**: configuration

pub mod bot;
pub mod core;
pub mod engine;
pub mod infrastructure;
pub mod quote;
pub mod store;

// Re-export commonly used types
pub use infrastructure::config::{Config, ConfigError};

use thiserror::Error;

/// Main error type for the bot
#[derive(Error, Debug)]
pub enum SwapwatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Quote source error: {0}")]
    Quote(#[from] quote::QuoteError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SwapwatchError>;
