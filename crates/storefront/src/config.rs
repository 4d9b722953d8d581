//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DOVINI_STORAGE` - Storage backend, `file` or `memory` (default: file)
//! - `DOVINI_DATA_DIR` - Directory for file storage (default: .dovini)
//! - `DOVINI_STORAGE_QUOTA_BYTES` - Byte quota for memory storage (default: 5242880)
//! - `DOVINI_TOAST_DURATION_MS` - How long a toast stays visible (default: 3000)
//! - `DOVINI_TOAST_LIMIT` - Maximum simultaneous toasts (default: 3)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::error::StorageError;
use crate::storage::{FileStorage, MemoryStorage, StorageArea};

const DEFAULT_DATA_DIR: &str = ".dovini";
/// Typical per-origin local storage limit in browsers.
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
const DEFAULT_TOAST_LIMIT: usize = 3;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where durable store state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One JSON file per key under the data directory.
    #[default]
    File,
    /// In-process only; state is lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{other}' (expected file or memory)")),
        }
    }
}

/// Storefront state layer configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storage backend for persistent stores
    pub storage: StorageBackend,
    /// Directory used by the file backend
    pub data_dir: PathBuf,
    /// Byte quota applied by the memory backend
    pub storage_quota_bytes: usize,
    /// Toast behaviour
    pub toast: ToastConfig,
}

/// Toast queue configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    /// How long a toast stays active
    pub duration: Duration,
    /// Maximum simultaneous toasts
    pub limit: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            limit: DEFAULT_TOAST_LIMIT,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            toast: ToastConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage = parse_or(&lookup, "DOVINI_STORAGE", defaults.storage)?;
        let data_dir = lookup("DOVINI_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let storage_quota_bytes = parse_or(
            &lookup,
            "DOVINI_STORAGE_QUOTA_BYTES",
            defaults.storage_quota_bytes,
        )?;
        let duration_ms = parse_or(&lookup, "DOVINI_TOAST_DURATION_MS", DEFAULT_TOAST_DURATION_MS)?;
        let limit = parse_or(&lookup, "DOVINI_TOAST_LIMIT", defaults.toast.limit)?;

        Ok(Self {
            storage,
            data_dir,
            storage_quota_bytes,
            toast: ToastConfig {
                duration: Duration::from_millis(duration_ms),
                limit,
            },
        })
    }

    /// Open the configured storage area.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file backend's directory cannot be created.
    pub fn open_storage(&self) -> Result<Arc<dyn StorageArea>, StorageError> {
        let area: Arc<dyn StorageArea> = match self.storage {
            StorageBackend::File => Arc::new(FileStorage::open(&self.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStorage::with_quota(self.storage_quota_bytes)),
        };
        Ok(area)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
