//! Settings backend trait.

use async_trait::async_trait;

use super::SettingsError;

/// Raw byte storage behind [`SettingsProvider`](super::SettingsProvider).
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or overwrite.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// Keys starting with `prefix`, matched literally.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
