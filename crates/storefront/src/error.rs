//! Storage error type.
//!
//! Storage areas report failures through [`StorageError`]. The persistence
//! bridge contains these errors (logs and drops them) so they never reach
//! store callers; they are only visible to code that talks to a
//! [`StorageArea`](crate::storage::StorageArea) directly.

use thiserror::Error;

/// Errors raised by a durable storage area.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the area's size quota.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be represented by this storage area.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type alias for `StorageError`.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: ../etc");

        let err = StorageError::QuotaExceeded {
            key: "dovini_cart".to_string(),
            needed: 12,
            quota: 10,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded writing dovini_cart: 12 bytes needed, quota is 10"
        );
    }
}
