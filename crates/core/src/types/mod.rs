//! Core types for Dovini.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod rating;

pub use id::*;
pub use price::Price;
pub use product::Product;
pub use rating::{Rating, RatingError};
