use super::SettingsRepositoryTrait;
use crate::constants::{
    DEFAULT_DISCOUNT_ENABLED, DEFAULT_DISCOUNT_PERCENT, SETTING_KEY_ENABLED, SETTING_KEY_PERCENT,
};
use crate::discount::validate_percent;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{DiscountSettings, DiscountSettingsUpdate};
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

// Define the trait for SettingsService
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<DiscountSettings>;

    fn is_discount_enabled(&self) -> Result<bool>;

    /// Validate the update and persist both keys together, or nothing at all.
    async fn update_settings(&self, update: &DiscountSettingsUpdate) -> Result<DiscountSettings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

// Implement the trait for SettingsService
#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<DiscountSettings> {
        Ok(DiscountSettings {
            percent: self.configured_percent()?,
            enabled: self.is_discount_enabled()?,
        })
    }

    fn is_discount_enabled(&self) -> Result<bool> {
        match self.settings_repository.get_setting(SETTING_KEY_ENABLED) {
            Ok(value) => Ok(value.parse().unwrap_or(DEFAULT_DISCOUNT_ENABLED)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(DEFAULT_DISCOUNT_ENABLED),
            Err(e) => Err(e),
        }
    }

    async fn update_settings(&self, update: &DiscountSettingsUpdate) -> Result<DiscountSettings> {
        let current = self.get_settings()?;

        let percent = match update.percent.as_deref() {
            Some(raw) => validate_percent(raw)?,
            None => current.percent,
        };
        let enabled = update.enabled.unwrap_or(current.enabled);

        let settings = DiscountSettings { percent, enabled };
        debug!(
            "Updating discount settings: percent={} enabled={}",
            settings.percent, settings.enabled
        );
        self.settings_repository.update_settings(&settings).await?;
        Ok(settings)
    }
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }

    fn configured_percent(&self) -> Result<Decimal> {
        let default_percent = || {
            DEFAULT_DISCOUNT_PERCENT
                .parse()
                .unwrap_or(Decimal::ZERO)
        };
        match self.settings_repository.get_setting(SETTING_KEY_PERCENT) {
            Ok(value) => Ok(value.parse().unwrap_or_else(|_| default_percent())),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(default_percent()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct MockSettingsRepository {
        values: RwLock<HashMap<String, String>>,
    }

    impl MockSettingsRepository {
        fn new(values: Vec<(&str, &str)>) -> Self {
            Self {
                values: RwLock::new(
                    values
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_setting(&self, setting_key: &str) -> Result<String> {
            self.values
                .read()
                .unwrap()
                .get(setting_key)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(setting_key.to_string()))
                })
        }

        async fn update_settings(&self, settings: &DiscountSettings) -> Result<()> {
            let mut values = self.values.write().unwrap();
            values.insert(SETTING_KEY_PERCENT.to_string(), settings.percent.to_string());
            values.insert(SETTING_KEY_ENABLED.to_string(), settings.enabled.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_defaults_when_store_is_empty() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::new(vec![])));
        let settings = service.get_settings().unwrap();
        assert_eq!(settings.percent, dec!(5.0));
        assert!(settings.enabled);
    }

    #[test]
    fn test_reads_stored_values() {
        let repo = MockSettingsRepository::new(vec![
            (SETTING_KEY_PERCENT, "7.5"),
            (SETTING_KEY_ENABLED, "false"),
        ]);
        let service = SettingsService::new(Arc::new(repo));
        let settings = service.get_settings().unwrap();
        assert_eq!(settings.percent, dec!(7.5));
        assert!(!settings.enabled);
    }

    #[tokio::test]
    async fn test_update_normalizes_comma_percent() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::new(vec![])));
        let updated = service
            .update_settings(&DiscountSettingsUpdate {
                percent: Some("12,5".to_string()),
                enabled: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(updated.percent, dec!(12.5));
        assert!(!updated.enabled);
        assert_eq!(service.get_settings().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_percent_without_writing() {
        let repo = Arc::new(MockSettingsRepository::new(vec![(
            SETTING_KEY_PERCENT,
            "5.0",
        )]));
        let service = SettingsService::new(repo);
        let result = service
            .update_settings(&DiscountSettingsUpdate {
                percent: Some("150".to_string()),
                enabled: Some(false),
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::PercentTooHigh))
        ));
        // Nothing written: enabled keeps its default
        assert!(service.is_discount_enabled().unwrap());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::new(vec![])));
        let updated = service
            .update_settings(&DiscountSettingsUpdate {
                percent: None,
                enabled: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(updated.percent, dec!(5.0));
        assert!(!updated.enabled);
    }
}
