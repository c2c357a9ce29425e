//! Jupiter swap-quote client
//!
//! One GET per poll tick against /swap/v1/quote. Amounts on the wire are
//! decimal strings in minor units; the derived rate is out/in scaled by each
//! asset's decimals.

use crate::core::Asset;
use crate::quote::{QuoteError, QuoteSource};
use serde::Deserialize;
use std::time::Duration;

/// Public lite endpoint, no API key required
pub const DEFAULT_API_URL: &str = "https://lite-api.jup.ag";

/// Default slippage tolerance: 10 bps = 0.1%
pub const DEFAULT_SLIPPAGE_BPS: u32 = 10;

/// HTTP client for the Jupiter quote API
pub struct JupiterClient {
    client: reqwest::Client,
    base_url: String,
    slippage_bps: u32,
}

impl JupiterClient {
    /// Create a client against the given base URL
    pub fn new(base_url: &str, slippage_bps: u32) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .user_agent("swapwatch/0.1")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            slippage_bps,
        }
    }
}

impl Default for JupiterClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_SLIPPAGE_BPS)
    }
}

impl QuoteSource for JupiterClient {
    async fn get_rate(&self, amount: u64, from: &Asset, to: &Asset) -> Result<f64, QuoteError> {
        let url = format!("{}/swap/v1/quote", self.base_url);

        tracing::debug!(
            "Requesting quote: {} {} minor units {} -> {}",
            url,
            amount,
            from.symbol,
            to.symbol
        );

        let amount_param = amount.to_string();
        let slippage_param = self.slippage_bps.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("inputMint", from.mint),
                ("outputMint", to.mint),
                ("amount", amount_param.as_str()),
                ("slippageBps", slippage_param.as_str()),
                ("restrictIntermediateTokens", "true"),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuoteError::Http(response.status().as_u16()));
        }

        let quote: QuoteResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::Parse(e.to_string()))?;

        quote.rate(from, to)
    }
}

/// Relevant subset of the /swap/v1/quote response
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "inAmount")]
    in_amount: String,
    #[serde(rename = "outAmount")]
    out_amount: String,
}

impl QuoteResponse {
    /// Derive out/in in human units
    fn rate(&self, from: &Asset, to: &Asset) -> Result<f64, QuoteError> {
        let in_minor: u64 = self
            .in_amount
            .parse()
            .map_err(|_| QuoteError::Parse(format!("bad inAmount: {:?}", self.in_amount)))?;
        let out_minor: u64 = self
            .out_amount
            .parse()
            .map_err(|_| QuoteError::Parse(format!("bad outAmount: {:?}", self.out_amount)))?;

        let in_ui = from.ui_amount(in_minor);
        if in_ui <= 0.0 {
            return Err(QuoteError::Parse("zero input amount in quote".to_string()));
        }
        Ok(to.ui_amount(out_minor) / in_ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SOL, USDC};

    #[test]
    fn test_quote_response_deserialize() {
        let json = r#"{
            "inAmount": "1000000",
            "outAmount": "6644156",
            "otherAmountThreshold": "6577715",
            "swapMode": "ExactIn"
        }"#;
        let quote: QuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(quote.in_amount, "1000000");
        assert_eq!(quote.out_amount, "6644156");
    }

    #[test]
    fn test_rate_scales_by_decimals() {
        // 1 USDC in, 0.00664 SOL out
        let quote = QuoteResponse {
            in_amount: "1000000".to_string(),
            out_amount: "6644156".to_string(),
        };
        let rate = quote.rate(&USDC, &SOL).unwrap();
        assert!((rate - 0.006644156).abs() < 1e-12);
    }

    #[test]
    fn test_rate_rejects_garbage_amounts() {
        let quote = QuoteResponse {
            in_amount: "abc".to_string(),
            out_amount: "6644156".to_string(),
        };
        assert!(matches!(quote.rate(&USDC, &SOL), Err(QuoteError::Parse(_))));

        let quote = QuoteResponse {
            in_amount: "0".to_string(),
            out_amount: "6644156".to_string(),
        };
        assert!(matches!(quote.rate(&USDC, &SOL), Err(QuoteError::Parse(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = JupiterClient::new("https://lite-api.jup.ag/", 10);
        assert_eq!(client.base_url, "https://lite-api.jup.ag");
    }
}
