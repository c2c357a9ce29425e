//! Chat command parsing
//!
//! Text-in, command-out. Malformed input becomes a [`CommandError`] whose
//! Display text is the user-visible usage reply.

use thiserror::Error;

/// Parsed inbound command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/start` - register the sender
    Start,
    /// `/subscribe <quantity> <target_rate>`
    Subscribe {
        /// None when the quantity argument is not numeric; defaults to 1
        /// downstream
        quantity: Option<f64>,
        target_rate: f64,
    },
    /// `/subscriptions` - list the sender's subscriptions
    Subscriptions,
    /// `/unsubscribe <n>` - remove the n-th subscription (1-based)
    Unsubscribe { position: usize },
    /// `/help`
    Help,
}

/// Parse failures, each one a ready-made usage reply
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("Usage: /subscribe <quantity> <target_rate>")]
    SubscribeUsage,

    #[error("Invalid rate. Please enter valid numbers.")]
    InvalidArguments,

    #[error("Usage: /unsubscribe <number>")]
    UnsubscribeUsage,

    #[error("Unknown command. Try /help.")]
    Unknown,
}

impl Command {
    /// Parse one message line into a command
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut parts = text.split_whitespace();
        let name = parts.next().ok_or(CommandError::Unknown)?;
        let args: Vec<&str> = parts.collect();

        match name {
            "/start" => Ok(Command::Start),
            "/subscribe" => {
                if args.len() < 2 {
                    return Err(CommandError::SubscribeUsage);
                }
                // Non-numeric quantity falls back to the default of 1; a
                // non-numeric rate is a hard error.
                let quantity = args[0].parse::<f64>().ok();
                let target_rate = args[1]
                    .parse::<f64>()
                    .map_err(|_| CommandError::InvalidArguments)?;
                Ok(Command::Subscribe {
                    quantity,
                    target_rate,
                })
            }
            "/subscriptions" => Ok(Command::Subscriptions),
            "/unsubscribe" => {
                let position = args
                    .first()
                    .and_then(|a| a.parse::<usize>().ok())
                    .filter(|&n| n >= 1)
                    .ok_or(CommandError::UnsubscribeUsage)?;
                Ok(Command::Unsubscribe { position })
            }
            "/help" => Ok(Command::Help),
            _ => Err(CommandError::Unknown),
        }
    }
}
