//! Poll loop / matcher
//!
//! A repeating timer task: ask the quote source for the canonical trade
//! quote, derive the current rate, quantize it with the same rule the
//! subscribe path uses, and notify every user indexed at exactly that key.
//! The task is tied to the shutdown signal, never fire-and-forget.

use crate::bot::notifier::Notifier;
use crate::core::{Asset, QuantizedRate};
use crate::quote::QuoteSource;
use crate::store::SubscriptionBook;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

/// Outcome of one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// At least one user's target was met; `notified` messages were sent
    MatchFound {
        rate: QuantizedRate,
        notified: usize,
    },
    /// Rate derived, nobody indexed at that key
    NoMatch { rate: QuantizedRate },
    /// Quote source unavailable or unusable; nothing matched this cycle
    PollFailed,
}

/// The recurring matcher over one asset pair
pub struct PollEngine<Q, N> {
    quote: Q,
    notifier: N,
    book: Arc<RwLock<SubscriptionBook>>,
    /// Asset spent on the canonical probe trade
    input: Asset,
    /// Asset received; subscriptions target input-per-output
    output: Asset,
    /// Probe size in input minor units
    trade_amount: u64,
    period: Duration,
}

impl<Q: QuoteSource, N: Notifier> PollEngine<Q, N> {
    pub fn new(
        quote: Q,
        notifier: N,
        book: Arc<RwLock<SubscriptionBook>>,
        input: Asset,
        output: Asset,
        trade_amount: u64,
        period: Duration,
    ) -> Self {
        Self {
            quote,
            notifier,
            book,
            input,
            output,
            trade_amount,
            period,
        }
    }

    /// Tick on a fixed period until shutdown fires
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            "poll loop started: {} -> {} every {:?}",
            self.input.symbol,
            self.output.symbol,
            self.period
        );
        let mut interval = tokio::time::interval(self.period);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.tick().await {
                        TickOutcome::MatchFound { rate, notified } => {
                            tracing::info!("target met at {} {}, notified {} users",
                                rate, self.input.symbol, notified);
                        }
                        TickOutcome::NoMatch { rate } => {
                            tracing::debug!("current rate {} {}, no subscribers matched",
                                rate, self.input.symbol);
                        }
                        TickOutcome::PollFailed => {}
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("poll loop stopped");
    }

    /// One poll cycle: Idle -> Polling -> outcome -> Idle
    pub async fn tick(&self) -> TickOutcome {
        // Suspension point; the stores stay untouched until the quote is in.
        let quote = match self
            .quote
            .get_rate(self.trade_amount, &self.input, &self.output)
            .await
        {
            Ok(rate) => rate,
            Err(error) => {
                // No retry here; the next scheduled tick is the retry.
                tracing::warn!("quote unavailable, skipping cycle: {}", error);
                return TickOutcome::PollFailed;
            }
        };

        // The quote is output-per-input; targets are input-per-output.
        if quote <= 0.0 || !quote.is_finite() {
            tracing::warn!("unusable quote {}, skipping cycle", quote);
            return TickOutcome::PollFailed;
        }
        let current_rate = 1.0 / quote;
        let Some(key) = QuantizedRate::from_f64(current_rate) else {
            tracing::warn!("rate {} not quantizable, skipping cycle", current_rate);
            return TickOutcome::PollFailed;
        };

        // Collect matches under the lock, notify after releasing it.
        let matched = {
            let book = self.book.read().await;
            book.matches(key)
        };
        if matched.is_empty() {
            return TickOutcome::NoMatch { rate: key };
        }

        let text = format!(
            "Target met! 1 {} now swaps at {} {}",
            self.output.symbol, key, self.input.symbol
        );
        for user_id in &matched {
            self.notifier.notify(*user_id, &text).await;
        }
        TickOutcome::MatchFound {
            rate: key,
            notified: matched.len(),
        }
    }
}
