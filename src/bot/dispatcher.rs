//! Command dispatch against the subscription book
//!
//! Every handler recovers its own errors into a reply string, so one user's
//! malformed input can never crash the shared process.

use crate::bot::command::{Command, CommandError};
use crate::bot::notifier::Notifier;
use crate::core::UserId;
use crate::store::{StoreError, SubscriptionBook};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, RwLock};

/// One inbound chat message, already attributed by the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub display_name: String,
    pub text: String,
}

const HELP_TEXT: &str = "Commands:\n\
    /start - Start the bot\n\
    /subscribe <quantity> <target_rate> - Subscribe to a rate\n\
    /subscriptions - List your subscriptions\n\
    /unsubscribe <n> - Remove a subscription\n\
    /help - Show this help message";

const NOT_REGISTERED_REPLY: &str = "Please use /start first";

/// Routes inbound commands to the subscription book and replies through the
/// notifier
pub struct Dispatcher<N> {
    book: Arc<RwLock<SubscriptionBook>>,
    notifier: N,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(book: Arc<RwLock<SubscriptionBook>>, notifier: N) -> Self {
        Self { book, notifier }
    }

    /// Consume inbound messages until the channel closes or shutdown fires
    pub async fn run(
        self,
        mut inbound: mpsc::Receiver<InboundMessage>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                maybe = inbound.recv() => match maybe {
                    Some(message) => {
                        let reply = self.handle(&message).await;
                        self.notifier.notify(message.user_id, &reply).await;
                    }
                    None => break,
                },
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("command dispatcher stopped");
    }

    /// Handle one message, always producing a reply
    pub async fn handle(&self, message: &InboundMessage) -> String {
        let command = match Command::parse(&message.text) {
            Ok(command) => command,
            Err(error) => {
                tracing::debug!(
                    "rejected command from user {}: {:?}",
                    message.user_id,
                    error
                );
                return error.to_string();
            }
        };

        match command {
            Command::Start => {
                let mut book = self.book.write().await;
                book.ensure_user(message.user_id, &message.display_name);
                tracing::info!(
                    "user {} ({}) registered, {} users total",
                    message.user_id,
                    message.display_name,
                    book.user_count()
                );
                "Hello there!".to_string()
            }
            Command::Subscribe {
                quantity,
                target_rate,
            } => {
                let mut book = self.book.write().await;
                match book.subscribe(message.user_id, quantity, target_rate) {
                    Ok(subscription) => {
                        tracing::info!(
                            "user {} subscribed: {} SOL @ {} USDC",
                            message.user_id,
                            subscription.quantity,
                            subscription.target_rate
                        );
                        "Subscribed successfully!".to_string()
                    }
                    Err(StoreError::NotRegistered(_)) => NOT_REGISTERED_REPLY.to_string(),
                    Err(StoreError::InvalidRate(_)) => {
                        CommandError::InvalidArguments.to_string()
                    }
                    Err(error) => {
                        tracing::warn!("subscribe failed for user {}: {}", message.user_id, error);
                        "Something went wrong, please try again.".to_string()
                    }
                }
            }
            Command::Subscriptions => {
                let book = self.book.read().await;
                match book.subscriptions(message.user_id) {
                    Ok([]) => "No subscriptions yet.".to_string(),
                    Ok(subscriptions) => subscriptions
                        .iter()
                        .map(|s| format!("* {} SOL @ {} USDC", s.quantity, s.target_rate))
                        .collect::<Vec<_>>()
                        .join("\n"),
                    Err(_) => NOT_REGISTERED_REPLY.to_string(),
                }
            }
            Command::Unsubscribe { position } => {
                let mut book = self.book.write().await;
                match book.unsubscribe(message.user_id, position - 1) {
                    Ok(removed) => format!(
                        "Removed subscription: {} SOL @ {} USDC",
                        removed.quantity, removed.target_rate
                    ),
                    Err(StoreError::NotRegistered(_)) => NOT_REGISTERED_REPLY.to_string(),
                    Err(StoreError::UnknownSubscription(_)) => {
                        format!("No subscription number {}.", position)
                    }
                    Err(error) => {
                        tracing::warn!(
                            "unsubscribe failed for user {}: {}",
                            message.user_id,
                            error
                        );
                        "Something went wrong, please try again.".to_string()
                    }
                }
            }
            Command::Help => HELP_TEXT.to_string(),
        }
    }
}
