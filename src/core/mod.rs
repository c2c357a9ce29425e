//! Core types for subscription matching
//!
//! This module contains the fundamental types used throughout the system:
//! - QuantizedRate: canonical 2-decimal rate key
//! - Asset: mint identity and decimal precision for the swap pair

pub mod asset;
pub mod rate;

pub use asset::{Asset, SOL, USDC};
pub use rate::QuantizedRate;

/// Opaque user identity assigned by the messaging platform
pub type UserId = u64;
