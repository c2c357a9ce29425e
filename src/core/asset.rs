//! Asset identity for the configured swap pair
//!
//! Amounts on the quote API wire are integers in minor units; the decimal
//! precision here is what scales them back to human-readable amounts.

/// An asset identified by its mint address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Ticker used in user-facing messages
    pub symbol: &'static str,
    /// Mint address on the quote API
    pub mint: &'static str,
    /// Decimal places of the minor unit
    pub decimals: u32,
}

/// Wrapped SOL
pub const SOL: Asset = Asset {
    symbol: "SOL",
    mint: "So11111111111111111111111111111111111111112",
    decimals: 9,
};

/// USDC
pub const USDC: Asset = Asset {
    symbol: "USDC",
    mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
    decimals: 6,
};

impl Asset {
    /// Scale an amount in minor units to a human-readable amount
    #[inline]
    pub fn ui_amount(&self, minor_units: u64) -> f64 {
        minor_units as f64 / 10f64.powi(self.decimals as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_amount_scaling() {
        assert_eq!(USDC.ui_amount(1_000_000), 1.0);
        assert_eq!(SOL.ui_amount(500_000_000), 0.5);
        assert_eq!(SOL.ui_amount(0), 0.0);
    }

    #[test]
    fn test_pair_constants() {
        assert_eq!(SOL.decimals, 9);
        assert_eq!(USDC.decimals, 6);
        assert_ne!(SOL.mint, USDC.mint);
    }
}
