//! Dovini Storefront state layer.
//!
//! Client-side shopping state (cart, wishlist, recently viewed, reviews,
//! toasts) with best-effort persistence to a durable key/value storage area.
//!
//! # Architecture
//!
//! - [`storage`] - Storage areas and the JSON [`Persistence`](storage::Persistence) bridge
//! - [`stores`] - Observable stores, the only way to mutate state
//! - [`state`] - [`AppState`](state::AppState), the explicit context handed to consumers
//! - [`config`] - Environment-driven configuration
//!
//! Stores are independent of one another; there are no cross-store
//! transactions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;

pub use config::StorefrontConfig;
pub use state::AppState;
