//! Denormalized index from quantized rate to interested users
//!
//! Answers "who cares about this exact rate" in O(1) during a poll tick.
//! Derived from the subscription store; [`super::SubscriptionBook`] keeps the
//! two consistent.

use crate::core::{QuantizedRate, UserId};
use std::collections::{HashMap, HashSet};

/// Rate key -> set of subscribed users
#[derive(Debug, Default)]
pub struct RateIndex {
    entries: HashMap<QuantizedRate, HashSet<UserId>>,
}

impl RateIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add a user under a quantized key. Set semantics: re-inserting the same
    /// user at the same key is a no-op.
    pub fn insert(&mut self, user_id: UserId, key: QuantizedRate) {
        self.entries.entry(key).or_default().insert(user_id);
    }

    /// Users subscribed at exactly this key. Never fails; an absent key
    /// yields an empty iterator.
    pub fn lookup(&self, key: QuantizedRate) -> impl Iterator<Item = UserId> + '_ {
        self.entries.get(&key).into_iter().flatten().copied()
    }

    pub fn contains(&self, key: QuantizedRate, user_id: UserId) -> bool {
        self.entries
            .get(&key)
            .is_some_and(|set| set.contains(&user_id))
    }

    /// Remove a user from a key, dropping the key once its set is empty.
    /// Symmetric with insertion.
    pub fn remove(&mut self, user_id: UserId, key: QuantizedRate) {
        if let Some(set) = self.entries.get_mut(&key) {
            set.remove(&user_id);
            if set.is_empty() {
                self.entries.remove(&key);
            }
        }
    }

    /// Number of distinct rate keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}
