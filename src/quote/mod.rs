//! Quote source boundary
//!
//! The poll loop only ever sees this narrow contract: give it a trade size
//! and two assets, get back a human-unit rate or a failure. A failure means
//! no match attempt this cycle, never a crash.

pub mod jupiter;

pub use jupiter::JupiterClient;

use crate::core::Asset;

/// Quote failures, recovered by skipping the current poll cycle
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("quote API returned HTTP {0}")]
    Http(u16),

    #[error("malformed quote response: {0}")]
    Parse(String),
}

/// Remote price-quote API
///
/// # Design Notes
/// - Generics for monomorphization; the poll loop takes `Q: QuoteSource`
/// - The call is potentially slow (network round-trip) and is the poll
///   loop's suspension point
#[allow(async_fn_in_trait)]
pub trait QuoteSource: Send + Sync {
    /// Rate for swapping `amount` minor units of `from` into `to`,
    /// as `output_amount / input_amount` scaled to human-readable units
    async fn get_rate(&self, amount: u64, from: &Asset, to: &Asset) -> Result<f64, QuoteError>;
}
