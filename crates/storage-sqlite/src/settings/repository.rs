use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use bankwire_discount_core::constants::{SETTING_KEY_ENABLED, SETTING_KEY_PERCENT};
use bankwire_discount_core::errors::Result;
use bankwire_discount_core::settings::{DiscountSettings, SettingsRepositoryTrait};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

// Implement the trait for SettingsRepository
#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_setting(&self, setting_key_param: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(setting_key_param))
            .select(setting_value)
            .first(&mut conn)
            .map_err(|e| StorageError::from(e).into())
    }

    async fn update_settings(&self, settings: &DiscountSettings) -> Result<()> {
        let settings = settings.clone();
        // Both keys land in one writer job, so one immediate transaction.
        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings)
                    .values(&AppSettingDB {
                        setting_key: SETTING_KEY_PERCENT.to_string(),
                        setting_value: settings.percent.to_string(),
                    })
                    .execute(conn)
                    .map_err(StorageError::from)?;

                diesel::replace_into(app_settings)
                    .values(&AppSettingDB {
                        setting_key: SETTING_KEY_ENABLED.to_string(),
                        setting_value: settings.enabled.to_string(),
                    })
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(())
            })
            .await
    }
}
