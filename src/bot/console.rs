//! Console chat adapter
//!
//! Stands in for a real messaging platform: one inbound message per stdin
//! line, `<user_id> <display_name> <text...>`, e.g.
//! `42 alice /subscribe 2 233.19`. Replies and alerts go to stdout.

use crate::bot::dispatcher::InboundMessage;
use crate::bot::notifier::Notification;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Read stdin lines into inbound messages until EOF
pub async fn pump_stdin(tx: mpsc::Sender<InboundMessage>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(message) = parse_line(&line) else {
                    if !line.trim().is_empty() {
                        eprintln!("expected: <user_id> <display_name> <text...>");
                    }
                    continue;
                };
                if tx.send(message).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("stdin read failed: {}", e);
                break;
            }
        }
    }
    tracing::info!("console input closed");
}

/// Print outbound notifications until the channel closes
pub async fn print_notifications(mut rx: mpsc::Receiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        println!("-> [{}] {}", notification.user_id, notification.text);
    }
}

fn parse_line(line: &str) -> Option<InboundMessage> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let user_id = parts.next()?.parse().ok()?;
    let display_name = parts.next()?.to_string();
    let text = parts.next()?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    Some(InboundMessage {
        user_id,
        display_name,
        text,
    })
}
