//! In-memory subscription state
//!
//! Two explicitly-owned containers plus the composition that keeps them
//! consistent:
//! - SubscriptionStore: user profiles and their ordered subscriptions
//! - RateIndex: quantized rate -> set of interested users
//! - SubscriptionBook: routes mutations through both

pub mod book;
pub mod rate_index;
pub mod subscriptions;

pub use book::SubscriptionBook;
pub use rate_index::RateIndex;
pub use subscriptions::{StoreError, Subscription, SubscriptionStore, UserProfile};
