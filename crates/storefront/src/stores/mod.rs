//! Observable state stores.
//!
//! Each store owns one slice of client state and is the only way to mutate
//! it. State is published through a [`tokio::sync::watch`] channel: callers
//! read the current value with `snapshot()` and re-render when a receiver
//! from `subscribe()` reports a change. Mutations that leave state unchanged
//! neither notify nor persist.
//!
//! ## Stores
//!
//! - [`CartStore`] - line items with derived totals (`dovini_cart`)
//! - [`WishlistStore`] - set of saved products (`dovini_wishlist`)
//! - [`RecentlyViewedStore`] - bounded move-to-front history (`dovini_recently_viewed`)
//! - [`ReviewsStore`] - customer reviews per product (`dovini_reviews`)
//! - [`ToastStore`] - transient notifications, never persisted

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::storage::Persistence;

pub mod cart;
pub mod recently_viewed;
pub mod reviews;
pub mod toast;
pub mod wishlist;

pub use cart::{CartItem, CartStore};
pub use recently_viewed::RecentlyViewedStore;
pub use reviews::{NewReview, Review, ReviewError, ReviewId, ReviewsStore};
pub use toast::{Toast, ToastId, ToastKind, ToastStore};
pub use wishlist::WishlistStore;

/// State that is hydrated from storage once and saved after every change.
///
/// Hydration and saving are independent: a failed save leaves memory ahead
/// of storage for the rest of the session.
pub(crate) struct PersistedState<T> {
    key: &'static str,
    state: watch::Sender<T>,
    persistence: Persistence,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Load the value under `key`, falling back to `T::default()`.
    pub(crate) fn hydrate(persistence: Persistence, key: &'static str) -> Self {
        let initial = persistence.load(key).unwrap_or_default();
        Self::with_initial(persistence, key, initial)
    }

    pub(crate) fn with_initial(persistence: Persistence, key: &'static str, initial: T) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            key,
            state,
            persistence,
        }
    }

    pub(crate) fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub(crate) const fn key(&self) -> &'static str {
        self.key
    }

    /// Borrow the current value. Must not be held across [`Self::update`].
    pub(crate) fn borrow(&self) -> watch::Ref<'_, T> {
        self.state.borrow()
    }

    pub(crate) fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// Apply `mutate`; it returns whether it changed anything.
    ///
    /// On change, subscribers are notified and the full value is saved.
    pub(crate) fn update(&self, mutate: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = self.state.send_if_modified(mutate);
        if changed {
            self.persistence.save(self.key, &*self.state.borrow());
        }
        changed
    }

    /// Replace the in-memory value without saving it back.
    pub(crate) fn replace(&self, value: T) {
        self.state.send_replace(value);
    }

    /// Reload from storage, replacing in-memory state.
    pub(crate) fn rehydrate(&self) {
        self.replace(self.persistence.load(self.key).unwrap_or_default());
    }
}
