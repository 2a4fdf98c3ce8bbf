//! SQLite storage implementation for promotional cart rules.

mod model;
mod repository;

pub use model::{CartRuleDB, NewCartRuleDB};
pub use repository::CartRuleRepository;

// Re-export trait from core for convenience
pub use bankwire_discount_core::cart_rules::CartRuleRepositoryTrait;
