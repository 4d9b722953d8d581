//! In-memory storage area.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{Result, StorageError};
use crate::storage::StorageArea;

/// Storage area backed by an in-process map.
///
/// An optional quota caps the combined byte length of all keys and values,
/// mirroring the per-origin limit browsers put on local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an unbounded storage area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage area that rejects writes beyond `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RwLock::default(),
            quota: Some(quota),
        }
    }

    /// Combined byte length of all keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.keys().cloned().collect())
    }
}
