//! Capability contract over the order subsystem's carts.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::carts::{AttachedCartRule, Cart};
use crate::errors::Result;

/// Repository trait for reading carts and attaching rules to them.
#[async_trait]
pub trait CartRepositoryTrait: Send + Sync {
    /// Get the current cart for a session, if one exists.
    fn get_cart_by_session(&self, session_id: &str) -> Result<Option<Cart>>;

    /// List the rules currently attached to a cart, in attach order.
    fn get_attached_rules(&self, cart_id: &str) -> Result<Vec<AttachedCartRule>>;

    /// Attach a rule to a cart, recording the reduction value at attach time.
    async fn attach_rule(&self, cart_id: &str, cart_rule_id: &str, value: Decimal) -> Result<()>;
}
