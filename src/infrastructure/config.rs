//! Configuration management
//!
//! Tunables load from config.toml at startup; every field has a default so a
//! missing file just means defaults. The chat credential is the one value
//! that must come from the environment and has no default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the chat platform credential
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Bot configuration, loaded from config.toml at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Poll loop settings
    #[serde(default)]
    pub poll: PollConfig,

    /// Quote API settings
    #[serde(default)]
    pub quote: QuoteConfig,
}

/// Poll loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollConfig {
    /// Seconds between poll ticks
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,

    /// Canonical probe trade size in input-asset minor units
    #[serde(default = "default_trade_amount")]
    pub trade_amount: u64,
}

/// Quote API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteConfig {
    /// Base URL of the quote API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Slippage tolerance in basis points
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            period_secs: default_period_secs(),
            trade_amount: default_trade_amount(),
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            slippage_bps: default_slippage_bps(),
        }
    }
}

fn default_period_secs() -> u64 {
    5
}

fn default_trade_amount() -> u64 {
    1_000_000 // 1 USDC
}

fn default_api_url() -> String {
    crate::quote::jupiter::DEFAULT_API_URL.to_string()
}

fn default_slippage_bps() -> u32 {
    crate::quote::jupiter::DEFAULT_SLIPPAGE_BPS
}

impl Config {
    /// Load configuration from config.toml (or `CONFIG_PATH`)
    ///
    /// A missing file yields defaults; a file that exists but does not parse
    /// is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => {
                let config: Config =
                    toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// The chat platform credential. Fatal when absent: the process must not
    /// start without it.
    pub fn bot_token(&self) -> Result<String, ConfigError> {
        std::env::var(BOT_TOKEN_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("{BOT_TOKEN_VAR} is not set")]
    MissingToken,
}
