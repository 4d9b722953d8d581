//! Customer product reviews.

use std::fmt;

use chrono::{DateTime, Utc};
use dovini_core::{ProductId, Rating};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::storage::{Persistence, keys};
use crate::stores::PersistedState;

/// Maximum review body length, in characters.
pub const MAX_BODY_CHARS: usize = 2000;

/// Reasons a review submission is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// A required text field is blank.
    #[error("Review {0} cannot be empty")]
    EmptyField(&'static str),

    /// The body exceeds [`MAX_BODY_CHARS`].
    #[error("Review body must be at most {max} characters")]
    BodyTooLong { max: usize },
}

/// Unique review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    pub rating: Rating,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A review as submitted by a customer.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub author: String,
    pub rating: Rating,
    pub title: String,
    pub body: String,
}

impl NewReview {
    fn validate(self) -> Result<Self, ReviewError> {
        let author = required(self.author, "author")?;
        let title = required(self.title, "title")?;
        let body = required(self.body, "body")?;
        if body.chars().count() > MAX_BODY_CHARS {
            return Err(ReviewError::BodyTooLong {
                max: MAX_BODY_CHARS,
            });
        }
        Ok(Self {
            author,
            title,
            body,
            ..self
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ReviewError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Reviews across all products, in submission order.
pub struct ReviewsStore {
    reviews: PersistedState<Vec<Review>>,
}

impl ReviewsStore {
    /// Create the store, hydrating from storage.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            reviews: PersistedState::hydrate(persistence, keys::REVIEWS),
        }
    }

    /// Validate and store a review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] if a text field is blank or the body is too
    /// long. Surrounding whitespace is trimmed before storing.
    pub fn add_review(&self, review: NewReview) -> Result<Review, ReviewError> {
        let review = review.validate()?;
        let stored = Review {
            id: ReviewId(Uuid::new_v4()),
            product_id: review.product_id,
            author: review.author,
            rating: review.rating,
            title: review.title,
            body: review.body,
            created_at: Utc::now(),
        };

        self.reviews.update(|reviews| {
            reviews.push(stored.clone());
            true
        });
        tracing::debug!(
            review_id = %stored.id,
            product_id = %stored.product_id,
            rating = stored.rating.stars(),
            "Added review"
        );
        Ok(stored)
    }

    /// Delete a review. Returns whether it existed.
    pub fn remove_review(&self, id: ReviewId) -> bool {
        self.reviews.update(|reviews| {
            let before = reviews.len();
            reviews.retain(|r| r.id != id);
            reviews.len() != before
        })
    }

    /// Reviews for one product, newest first.
    #[must_use]
    pub fn reviews_for(&self, product_id: ProductId) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .borrow()
            .iter()
            .rev()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    /// Mean star rating for a product, to one decimal place.
    #[must_use]
    pub fn average_rating(&self, product_id: ProductId) -> Option<Decimal> {
        let reviews = self.reviews.borrow();
        let (sum, count) = reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .fold((0u32, 0u32), |(sum, count), r| {
                (sum + u32::from(r.rating.stars()), count + 1)
            });
        if count == 0 {
            return None;
        }
        Some((Decimal::from(sum) / Decimal::from(count)).round_dp(1))
    }

    /// Number of reviews for a product.
    #[must_use]
    pub fn review_count(&self, product_id: ProductId) -> usize {
        self.reviews
            .borrow()
            .iter()
            .filter(|r| r.product_id == product_id)
            .count()
    }

    /// Receiver notified after every review change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Review>> {
        self.reviews.subscribe()
    }

    /// Reload reviews from storage, discarding in-memory state.
    pub fn rehydrate(&self) {
        self.reviews.rehydrate();
    }
}
