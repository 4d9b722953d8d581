//! Durable key/value storage for store state.
//!
//! # Concepts
//!
//! A [`StorageArea`] is the equivalent of the browser's origin-scoped local
//! storage: a flat map of string keys to string values that outlives the
//! stores reading it. Every store created over the same area shares it, and
//! the last writer wins.
//!
//! Stores never talk to an area directly. They go through [`Persistence`],
//! which adds JSON encoding and contains every failure, so a broken or full
//! storage area degrades to "state does not survive a restart" rather than
//! an error.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map with an optional byte quota. Used for
//!   tests and for sessions that should not touch the disk.
//! - [`FileStorage`] - one JSON file per key in a data directory.

use crate::error::Result;

pub mod bridge;
pub mod file;
pub mod memory;

pub use bridge::Persistence;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Object-safe key/value storage area.
pub trait StorageArea: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid, the quota would be exceeded,
    /// or the backing medium cannot be written. On error the previous value
    /// is left in place.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Delete every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn clear(&self) -> Result<()>;

    /// All keys currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Storage keys used by the persistent stores.
pub mod keys {
    /// Key for the recently viewed product list.
    pub const RECENTLY_VIEWED: &str = "dovini_recently_viewed";

    /// Key for the cart line items.
    pub const CART: &str = "dovini_cart";

    /// Key for the wishlist.
    pub const WISHLIST: &str = "dovini_wishlist";

    /// Key for customer reviews.
    pub const REVIEWS: &str = "dovini_reviews";
}
