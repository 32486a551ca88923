//! Settings system for typed key-value storage.

mod backend;
mod sqlite;

pub use backend::SettingsBackend;
pub use sqlite::SqliteBackend;

use std::path::Path;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use siteadmin_lib::table::PageSize;
use thiserror::Error;

/// Base URL of the admin backend.
pub const BACKEND_URL: &str = "backend.url";
const AUTH_PREFIX: &str = "auth.";
/// Bearer token from the last successful login.
pub const AUTH_TOKEN: &str = "auth.token";
/// Default rows per page for table views.
pub const TABLE_PAGE_SIZE: &str = "table.page_size";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("could not create settings directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Typed settings provider.
///
/// Wraps a `SettingsBackend` with typed serialization via bincode.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Create a new settings provider with the given backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open the SQLite store at `path`, creating parent directories.
    pub async fn open(path: &Path) -> Result<Self, SettingsError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(Self::new(SqliteBackend::new(path).await?))
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    /// Delete a key.
    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(key).await
    }

    /// Get all keys matching a prefix.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys_with_prefix(prefix).await
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub async fn backend_url(&self) -> Result<Option<String>, SettingsError> {
        self.get(BACKEND_URL).await
    }

    pub async fn set_backend_url(&self, url: &str) -> Result<(), SettingsError> {
        self.set(BACKEND_URL, &url.to_string()).await
    }

    pub async fn token(&self) -> Result<Option<String>, SettingsError> {
        self.get(AUTH_TOKEN).await
    }

    pub async fn set_token(&self, token: &str) -> Result<(), SettingsError> {
        self.set(AUTH_TOKEN, &token.to_string()).await
    }

    /// Removes every `auth.` setting.
    pub async fn clear_auth(&self) -> Result<(), SettingsError> {
        for key in self.keys_with_prefix(AUTH_PREFIX).await? {
            self.delete(&key).await?;
        }
        Ok(())
    }

    /// Stored page size, falling back to the default when unset or invalid.
    pub async fn page_size(&self) -> Result<PageSize, SettingsError> {
        let stored: Option<u64> = self.get(TABLE_PAGE_SIZE).await?;
        Ok(stored
            .and_then(|n| PageSize::try_from(n as usize).ok())
            .unwrap_or_default())
    }

    pub async fn set_page_size(&self, size: PageSize) -> Result<(), SettingsError> {
        self.set(TABLE_PAGE_SIZE, &(size.get() as u64)).await
    }
}
