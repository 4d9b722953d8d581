//! JSON persistence bridge over a storage area.
//!
//! Durable storage is a best-effort cache, never the source of truth for the
//! running session. Every failure here is logged and swallowed: a failed
//! load looks like an absent key, a failed save leaves the caller's
//! in-memory state ahead of storage.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::StorageArea;

/// Shared, stateless JSON codec over a [`StorageArea`].
///
/// Cheaply cloneable; every clone talks to the same area.
#[derive(Clone)]
pub struct Persistence {
    area: Arc<dyn StorageArea>,
}

impl Persistence {
    /// Wrap a storage area.
    #[must_use]
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        Self { area }
    }

    /// The underlying storage area.
    #[must_use]
    pub fn area(&self) -> &Arc<dyn StorageArea> {
        &self.area
    }

    /// Read and decode the value stored under `key`.
    ///
    /// Returns `None` if the key is absent, the area cannot be read, or the
    /// stored text is not valid JSON for `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.area.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding malformed stored value");
                None
            }
        }
    }

    /// Encode `value` and store it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode value for storage");
                return;
            }
        };

        if let Err(e) = self.area.set_item(key, &json) {
            tracing::warn!(key = %key, error = %e, "Failed to write to storage");
        } else {
            tracing::trace!(key = %key, bytes = json.len(), "Saved to storage");
        }
    }

    /// Delete the value stored under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.area.remove_item(key) {
            tracing::warn!(key = %key, error = %e, "Failed to remove from storage");
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn bridge() -> (Arc<MemoryStorage>, Persistence) {
        let area = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(area.clone());
        (area, persistence)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_, persistence) = bridge();
        persistence.save("numbers", &vec![3, 1, 2]);
        assert_eq!(persistence.load::<Vec<i32>>("numbers"), Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_load_absent_key_is_none() {
        let (_, persistence) = bridge();
        assert_eq!(persistence.load::<Vec<i32>>("missing"), None);
    }

    #[test]
    fn test_load_malformed_json_is_none() {
        let (area, persistence) = bridge();
        area.set_item("broken", "{not json").unwrap();
        assert_eq!(persistence.load::<Vec<i32>>("broken"), None);
    }

    #[test]
    fn test_load_wrong_shape_is_none() {
        let (area, persistence) = bridge();
        area.set_item("shape", r#"{"a":1}"#).unwrap();
        assert_eq!(persistence.load::<Vec<i32>>("shape"), None);
    }

    #[test]
    fn test_save_failure_is_contained() {
        let area = Arc::new(MemoryStorage::with_quota(8));
        let persistence = Persistence::new(area.clone());

        persistence.save("key", &"a value far longer than the quota allows");
        assert!(area.get_item("key").unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let (area, persistence) = bridge();
        persistence.save("k", &1);
        persistence.remove("k");
        assert!(area.get_item("k").unwrap().is_none());
    }
}
