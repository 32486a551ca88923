//! SQLite settings store.
//!
//! The whole table is mirrored in memory. `PRAGMA data_version` changes when
//! another connection commits, so a login or `config` run in a second
//! terminal is picked up by a running `browse` on its next read.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";
const UPSERT: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";

/// Nothing loaded yet.
const UNLOADED: i64 = -1;

pub struct SqliteBackend {
    client: Client,
    mirror: DashMap<String, Vec<u8>>,
    /// `data_version` the mirror was loaded at.
    loaded_at: AtomicI64,
}

impl SqliteBackend {
    /// Open (or create) the database at `path`.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;
        client
            .conn(|conn| conn.execute(CREATE_TABLE, []))
            .await?;

        Ok(Self {
            client,
            mirror: DashMap::new(),
            loaded_at: AtomicI64::new(UNLOADED),
        })
    }

    /// Reloads the mirror if another connection committed since the last load.
    async fn sync(&self) -> Result<(), SettingsError> {
        let known = self.loaded_at.load(Ordering::Acquire);
        let reloaded = self
            .client
            .conn(move |conn| {
                let version: i64 = conn.query_row("PRAGMA data_version", [], |row| row.get(0))?;
                if version == known {
                    return Ok(None);
                }
                let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<Result<HashMap<String, Vec<u8>>, _>>()?;
                Ok(Some((version, rows)))
            })
            .await?;

        if let Some((version, rows)) = reloaded {
            if known != UNLOADED {
                log::debug!("Settings changed on disk, reloading {} keys", rows.len());
            }
            self.mirror.retain(|key, _| rows.contains_key(key));
            for (key, value) in rows {
                self.mirror.insert(key, value);
            }
            self.loaded_at.store(version, Ordering::Release);
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        self.sync().await?;
        Ok(self.mirror.get(key).map(|value| value.clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let (owned, stored) = (key.to_string(), value.clone());
        self.client
            .conn(move |conn| conn.execute(UPSERT, rusqlite::params![&owned, &stored]))
            .await?;

        self.mirror.insert(key.to_string(), value);
        log::debug!("Stored setting {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let owned = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM settings WHERE key = ?1", [&owned]))
            .await?;

        self.mirror.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.sync().await?;
        let mut keys: Vec<String> = self
            .mirror
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
