pub mod cart_rules_model;
pub mod cart_rules_traits;
pub use cart_rules_model::*;
pub use cart_rules_traits::CartRuleRepositoryTrait;
