//! Dovini Core - Shared types library.
//!
//! This crate provides the domain types used across all Dovini components:
//! - `storefront` - Client-side state layer (cart, wishlist, recently viewed)
//! - `cli` - Command-line shopping front end over the state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, ratings, and the
//!   catalog [`Product`] record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
