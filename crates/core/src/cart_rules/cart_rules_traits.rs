use async_trait::async_trait;

use crate::cart_rules::{CartRule, NewCartRule};
use crate::errors::Result;

/// Repository trait for the promotional-rule store.
#[async_trait]
pub trait CartRuleRepositoryTrait: Send + Sync {
    /// Persist a new cart rule and return the stored record.
    async fn create_cart_rule(&self, new_rule: NewCartRule) -> Result<CartRule>;
}
