//! swapwatch binary
//!
//! Wires the console chat adapter, the command dispatcher and the poll loop
//! together, and tears everything down on Ctrl-C.

use std::sync::Arc;
use std::time::Duration;
use swapwatch::bot::{console, ChannelNotifier, Dispatcher};
use swapwatch::core::{SOL, USDC};
use swapwatch::engine::PollEngine;
use swapwatch::quote::JupiterClient;
use swapwatch::store::SubscriptionBook;
use swapwatch::Config;
use tokio::sync::{mpsc, watch, RwLock};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> swapwatch::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    // The chat credential must be present before anything starts; a missing
    // token exits non-zero here.
    let token = config.bot_token()?;
    tracing::debug!("chat credential loaded ({} chars)", token.len());

    tracing::info!("Starting swapwatch...");

    // Stores are constructed once here and handed into the tasks; nothing
    // reaches them through ambient state.
    let book = Arc::new(RwLock::new(SubscriptionBook::new()));
    let (notifier, notifications) = ChannelNotifier::new(100);
    let (inbound_tx, inbound_rx) = mpsc::channel(100);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let engine = PollEngine::new(
        JupiterClient::new(&config.quote.api_url, config.quote.slippage_bps),
        notifier.clone(),
        book.clone(),
        USDC,
        SOL,
        config.poll.trade_amount,
        Duration::from_secs(config.poll.period_secs),
    );
    let poll_handle = tokio::spawn(engine.run(shutdown_rx.clone()));

    let dispatcher = Dispatcher::new(book, notifier);
    let dispatch_handle = tokio::spawn(dispatcher.run(inbound_rx, shutdown_rx));

    // Console transport; in-flight IO is abandoned on shutdown.
    tokio::spawn(console::pump_stdin(inbound_tx));
    tokio::spawn(console::print_notifications(notifications));

    tracing::info!("Bot started and ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("termination signal received, shutting down");
    let _ = shutdown_tx.send(true);
    let _ = tokio::join!(poll_handle, dispatch_handle);

    tracing::info!("Shutdown complete");
    Ok(())
}
