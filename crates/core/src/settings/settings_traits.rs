//! Repository traits for discount settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::DiscountSettings;

/// Repository trait for the persisted key/value settings store.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Write both discount settings keys together, atomically.
    async fn update_settings(&self, settings: &DiscountSettings) -> Result<()>;
}
