use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use bankwire_discount_core::carts::CartRepositoryTrait;
use bankwire_discount_core::discount::{DiscountService, DiscountServiceTrait};
use bankwire_discount_core::settings::{SettingsService, SettingsServiceTrait};
use bankwire_discount_storage_sqlite::cart_rules::CartRuleRepository;
use bankwire_discount_storage_sqlite::carts::CartRepository;
use bankwire_discount_storage_sqlite::db;
use bankwire_discount_storage_sqlite::settings::SettingsRepository;

pub struct AppState {
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub discount_service: Arc<dyn DiscountServiceTrait>,
    pub cart_repository: Arc<dyn CartRepositoryTrait>,
    pub module_active: bool,
    pub db_path: String,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let settings_service = Arc::new(SettingsService::new(settings_repository));

    let cart_repository = Arc::new(CartRepository::new(pool.clone(), writer.clone()));
    let cart_rule_repository = Arc::new(CartRuleRepository::new(pool.clone(), writer.clone()));
    let discount_service = Arc::new(DiscountService::new(
        cart_repository.clone(),
        cart_rule_repository,
    ));

    Ok(Arc::new(AppState {
        settings_service,
        discount_service,
        cart_repository,
        module_active: config.module_active,
        db_path,
    }))
}
