//! Outbound notification boundary
//!
//! The poll loop and the dispatcher both talk to users through this seam;
//! what sits behind it (console printer, real chat transport) is wiring.

use crate::core::UserId;
use tokio::sync::mpsc;

/// A message addressed to one user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub user_id: UserId,
    pub text: String,
}

/// Outbound message sink
#[allow(async_fn_in_trait)]
pub trait Notifier: Send + Sync {
    /// Dispatch one message to one user. Delivery failures are the
    /// implementation's problem; callers never crash on them.
    async fn notify(&self, user_id: UserId, text: &str);
}

/// Channel-backed notifier; the receiving end is the transport adapter
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the transport drains
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    async fn notify(&self, user_id: UserId, text: &str) {
        let notification = Notification {
            user_id,
            text: text.to_string(),
        };
        if self.tx.send(notification).await.is_err() {
            tracing::warn!("notification for user {} dropped: transport closed", user_id);
        }
    }
}
