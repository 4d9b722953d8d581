//! Review star rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside the accepted star range.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: u8,
        /// Minimum accepted value.
        min: u8,
        /// Maximum accepted value.
        max: u8,
    },
}

/// A customer review rating of 1 to 5 stars.
///
/// ## Examples
///
/// ```
/// use dovini_core::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] unless `stars` is within 1..=5.
    pub const fn new(stars: u8) -> Result<Self, RatingError> {
        if stars < Self::MIN || stars > Self::MAX {
            return Err(RatingError::OutOfRange {
                value: stars,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(stars))
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(
            Rating::new(0),
            Err(RatingError::OutOfRange {
                value: 0,
                min: 1,
                max: 5
            })
        );
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn test_rating_deserialize_validates() {
        let rating: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(rating.stars(), 4);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::new(3).unwrap().to_string(), "3/5");
    }
}
