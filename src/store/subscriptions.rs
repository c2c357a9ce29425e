//! Per-user subscription storage
//!
//! Users are created on first contact and live for the process lifetime.
//! Subscriptions are appended in order and never edited in place.

use crate::core::UserId;
use std::collections::HashMap;
use thiserror::Error;

/// A registered target rate for one user
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    /// Trade size the user asked about. Defaults to 1 when omitted and is
    /// deliberately not validated to be positive.
    pub quantity: f64,
    /// Target rate in USDC per SOL
    pub target_rate: f64,
    /// Always true for now; kept so deactivation does not change the layout
    pub active: bool,
}

/// Profile created on first `/start`
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    subscriptions: Vec<Subscription>,
}

impl UserProfile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: Vec::new(),
        }
    }

    /// Subscriptions in insertion order
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }
}

/// Store errors, recovered at the command-handler boundary
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("user {0} is not registered")]
    NotRegistered(UserId),

    #[error("invalid target rate: {0}")]
    InvalidRate(f64),

    #[error("no subscription at position {0}")]
    UnknownSubscription(usize),
}

/// All user profiles, keyed by platform identity
#[derive(Debug, Default)]
pub struct SubscriptionStore {
    users: HashMap<UserId, UserProfile>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Idempotent registration. An existing profile is returned unchanged;
    /// the display name is not updated on repeat calls.
    pub fn ensure_user(&mut self, user_id: UserId, display_name: &str) -> &UserProfile {
        self.users
            .entry(user_id)
            .or_insert_with(|| UserProfile::new(display_name))
    }

    pub fn is_registered(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    /// Append an active subscription for a registered user
    ///
    /// The target rate must be a finite positive number. Quantity defaults to
    /// 1 when absent; duplicates at the same rate are permitted here (the rate
    /// index collapses them).
    pub fn add_subscription(
        &mut self,
        user_id: UserId,
        quantity: Option<f64>,
        target_rate: f64,
    ) -> Result<Subscription, StoreError> {
        if !target_rate.is_finite() || target_rate <= 0.0 {
            return Err(StoreError::InvalidRate(target_rate));
        }
        let profile = self
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotRegistered(user_id))?;

        let subscription = Subscription {
            quantity: quantity.unwrap_or(1.0),
            target_rate,
            active: true,
        };
        profile.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    /// Subscriptions for one user, in insertion order
    pub fn list_subscriptions(&self, user_id: UserId) -> Result<&[Subscription], StoreError> {
        self.users
            .get(&user_id)
            .map(|p| p.subscriptions.as_slice())
            .ok_or(StoreError::NotRegistered(user_id))
    }

    /// Remove the subscription at a zero-based list position
    pub fn remove_subscription(
        &mut self,
        user_id: UserId,
        position: usize,
    ) -> Result<Subscription, StoreError> {
        let profile = self
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::NotRegistered(user_id))?;
        if position >= profile.subscriptions.len() {
            return Err(StoreError::UnknownSubscription(position));
        }
        Ok(profile.subscriptions.remove(position))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_user_starts_empty() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        assert_eq!(store.list_subscriptions(1).unwrap(), &[]);
    }

    #[test]
    fn test_ensure_user_is_idempotent() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        store.add_subscription(1, None, 233.19).unwrap();

        // Repeat call keeps subscriptions and the original name
        let profile = store.ensure_user(1, "renamed");
        assert_eq!(profile.name, "alice");
        assert_eq!(profile.subscriptions().len(), 1);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_add_before_ensure_fails() {
        let mut store = SubscriptionStore::new();
        assert_eq!(
            store.add_subscription(7, Some(2.0), 150.0),
            Err(StoreError::NotRegistered(7))
        );
    }

    #[test]
    fn test_add_rejects_bad_rates() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        assert!(matches!(
            store.add_subscription(1, None, 0.0),
            Err(StoreError::InvalidRate(_))
        ));
        assert!(matches!(
            store.add_subscription(1, None, -5.0),
            Err(StoreError::InvalidRate(_))
        ));
        assert!(matches!(
            store.add_subscription(1, None, f64::NAN),
            Err(StoreError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        let sub = store.add_subscription(1, None, 150.5).unwrap();
        assert_eq!(sub.quantity, 1.0);
        assert_eq!(sub.target_rate, 150.5);
        assert!(sub.active);
    }

    #[test]
    fn test_insertion_order_and_duplicates() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        store.add_subscription(1, Some(2.0), 100.0).unwrap();
        store.add_subscription(1, Some(3.0), 200.0).unwrap();
        // Duplicate rate is recorded again at the store level
        store.add_subscription(1, Some(4.0), 100.0).unwrap();

        let subs = store.list_subscriptions(1).unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].quantity, 2.0);
        assert_eq!(subs[1].target_rate, 200.0);
        assert_eq!(subs[2].target_rate, 100.0);
    }

    #[test]
    fn test_remove_subscription() {
        let mut store = SubscriptionStore::new();
        store.ensure_user(1, "alice");
        store.add_subscription(1, None, 100.0).unwrap();
        store.add_subscription(1, None, 200.0).unwrap();

        let removed = store.remove_subscription(1, 0).unwrap();
        assert_eq!(removed.target_rate, 100.0);
        assert_eq!(store.list_subscriptions(1).unwrap().len(), 1);

        assert_eq!(
            store.remove_subscription(1, 5),
            Err(StoreError::UnknownSubscription(5))
        );
        assert_eq!(
            store.remove_subscription(9, 0),
            Err(StoreError::NotRegistered(9))
        );
    }
}
