//! SQLite storage implementation for carts and their attached rules.

mod model;
mod repository;

pub use model::{CartDB, NewCartCartRuleDB};
pub use repository::CartRepository;

// Re-export trait from core for convenience
pub use bankwire_discount_core::carts::CartRepositoryTrait;
