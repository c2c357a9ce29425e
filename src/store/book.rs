//! Composition of the subscription store and the rate index
//!
//! Every successful subscribe must land in both containers; routing all
//! mutations through here is what keeps the index consistent with the store
//! (every active subscription's quantized rate is a key whose set contains
//! the owning user).

use crate::core::{QuantizedRate, UserId};
use crate::store::rate_index::RateIndex;
use crate::store::subscriptions::{StoreError, Subscription, SubscriptionStore, UserProfile};

/// Owns the two subscription-side containers, constructed once at startup
/// and passed by handle into the dispatcher and the poll task.
#[derive(Debug, Default)]
pub struct SubscriptionBook {
    store: SubscriptionStore,
    index: RateIndex,
}

impl SubscriptionBook {
    pub fn new() -> Self {
        Self {
            store: SubscriptionStore::new(),
            index: RateIndex::new(),
        }
    }

    /// Idempotent registration, see [`SubscriptionStore::ensure_user`]
    pub fn ensure_user(&mut self, user_id: UserId, display_name: &str) -> &UserProfile {
        self.store.ensure_user(user_id, display_name)
    }

    pub fn is_registered(&self, user_id: UserId) -> bool {
        self.store.is_registered(user_id)
    }

    /// Record a subscription and index its quantized rate
    pub fn subscribe(
        &mut self,
        user_id: UserId,
        quantity: Option<f64>,
        target_rate: f64,
    ) -> Result<Subscription, StoreError> {
        // Quantize up front so a rate the index cannot hold never reaches
        // the store either.
        let key =
            QuantizedRate::from_f64(target_rate).ok_or(StoreError::InvalidRate(target_rate))?;
        let subscription = self
            .store
            .add_subscription(user_id, quantity, target_rate)?;
        self.index.insert(user_id, key);
        Ok(subscription)
    }

    /// Remove a subscription by zero-based position and prune the index
    ///
    /// The user stays under the key while another of their subscriptions
    /// still quantizes to it.
    pub fn unsubscribe(
        &mut self,
        user_id: UserId,
        position: usize,
    ) -> Result<Subscription, StoreError> {
        let removed = self.store.remove_subscription(user_id, position)?;
        if let Some(key) = QuantizedRate::from_f64(removed.target_rate) {
            let still_keyed = self
                .store
                .list_subscriptions(user_id)?
                .iter()
                .any(|s| QuantizedRate::from_f64(s.target_rate) == Some(key));
            if !still_keyed {
                self.index.remove(user_id, key);
            }
        }
        Ok(removed)
    }

    /// Subscriptions for one user, in insertion order
    pub fn subscriptions(&self, user_id: UserId) -> Result<&[Subscription], StoreError> {
        self.store.list_subscriptions(user_id)
    }

    /// Users whose target quantizes to exactly this key
    pub fn matches(&self, key: QuantizedRate) -> Vec<UserId> {
        self.index.lookup(key).collect()
    }

    pub fn user_count(&self) -> usize {
        self.store.user_count()
    }

    #[cfg(test)]
    pub(crate) fn index(&self) -> &RateIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(rate: f64) -> QuantizedRate {
        QuantizedRate::from_f64(rate).unwrap()
    }

    #[test]
    fn test_subscribe_updates_both_sides() {
        let mut book = SubscriptionBook::new();
        book.ensure_user(1, "alice");
        book.subscribe(1, Some(2.0), 233.19).unwrap();

        assert_eq!(book.subscriptions(1).unwrap().len(), 1);
        assert!(book.matches(key(233.19)).contains(&1));
    }

    #[test]
    fn test_subscribe_requires_registration() {
        let mut book = SubscriptionBook::new();
        assert_eq!(
            book.subscribe(1, None, 233.19),
            Err(StoreError::NotRegistered(1))
        );
        assert_eq!(book.index().key_count(), 0);
    }

    #[test]
    fn test_invalid_rate_touches_nothing() {
        let mut book = SubscriptionBook::new();
        book.ensure_user(1, "alice");
        assert!(matches!(
            book.subscribe(1, None, f64::NAN),
            Err(StoreError::InvalidRate(_))
        ));
        assert_eq!(book.subscriptions(1).unwrap().len(), 0);
        assert_eq!(book.index().key_count(), 0);
    }

    #[test]
    fn test_duplicate_store_entries_single_index_slot() {
        let mut book = SubscriptionBook::new();
        book.ensure_user(1, "alice");
        book.subscribe(1, Some(1.0), 100.0).unwrap();
        book.subscribe(1, Some(2.0), 100.0).unwrap();

        assert_eq!(book.subscriptions(1).unwrap().len(), 2);
        assert_eq!(book.matches(key(100.0)), vec![1]);
    }

    #[test]
    fn test_unsubscribe_keeps_key_while_duplicate_remains() {
        let mut book = SubscriptionBook::new();
        book.ensure_user(1, "alice");
        book.subscribe(1, Some(1.0), 100.0).unwrap();
        book.subscribe(1, Some(2.0), 100.004).unwrap(); // same key after quantization

        book.unsubscribe(1, 0).unwrap();
        assert!(book.matches(key(100.0)).contains(&1));

        book.unsubscribe(1, 0).unwrap();
        assert!(book.matches(key(100.0)).is_empty());
        assert_eq!(book.index().key_count(), 0);
    }

    #[test]
    fn test_store_index_consistency_invariant() {
        let mut book = SubscriptionBook::new();
        book.ensure_user(1, "alice");
        book.ensure_user(2, "bob");
        book.subscribe(1, None, 233.194).unwrap();
        book.subscribe(2, None, 233.191).unwrap();
        book.subscribe(2, None, 150.5).unwrap();

        for user in [1u64, 2] {
            for sub in book.subscriptions(user).unwrap() {
                let k = QuantizedRate::from_f64(sub.target_rate).unwrap();
                assert!(book.matches(k).contains(&user));
            }
        }
    }
}
