use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::cart_rules::{CartRuleRepositoryTrait, NewCartRule};
use crate::carts::{AttachedCartRule, Cart, CartRepositoryTrait};
use crate::constants::CART_RULE_PREFIX;
use crate::discount::discount_policy::compute_discount_amount;
use crate::discount::{ApplyOutcome, SkipReason};
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::DiscountSettings;
use rust_decimal::Decimal;

#[async_trait]
pub trait DiscountServiceTrait: Send + Sync {
    /// Return the first attached rule whose code carries the discount prefix.
    fn find_existing_discount(&self, cart: &Cart) -> Result<Option<AttachedCartRule>>;

    /// Idempotently create and attach the bank-wire discount rule to a cart.
    async fn apply_discount(
        &self,
        cart: &Cart,
        settings: &DiscountSettings,
    ) -> Result<ApplyOutcome>;
}

pub struct DiscountService {
    cart_repository: Arc<dyn CartRepositoryTrait>,
    cart_rule_repository: Arc<dyn CartRuleRepositoryTrait>,
}

impl DiscountService {
    pub fn new(
        cart_repository: Arc<dyn CartRepositoryTrait>,
        cart_rule_repository: Arc<dyn CartRuleRepositoryTrait>,
    ) -> Self {
        DiscountService {
            cart_repository,
            cart_rule_repository,
        }
    }
}

#[async_trait]
impl DiscountServiceTrait for DiscountService {
    fn find_existing_discount(&self, cart: &Cart) -> Result<Option<AttachedCartRule>> {
        let rules = self.cart_repository.get_attached_rules(&cart.id)?;
        // First match in attach order; no ranking.
        Ok(rules
            .into_iter()
            .find(|rule| rule.code.starts_with(CART_RULE_PREFIX)))
    }

    async fn apply_discount(
        &self,
        cart: &Cart,
        settings: &DiscountSettings,
    ) -> Result<ApplyOutcome> {
        if !settings.enabled {
            return Ok(ApplyOutcome::NotApplied {
                reason: SkipReason::DiscountDisabled,
            });
        }
        if settings.percent <= Decimal::ZERO {
            return Ok(ApplyOutcome::NotApplied {
                reason: SkipReason::NothingToApply,
            });
        }

        if let Some(existing) = self.find_existing_discount(cart)? {
            debug!(
                "Cart {} already carries discount rule {}",
                cart.id, existing.code
            );
            return Ok(ApplyOutcome::AlreadyApplied {
                amount: existing.value,
            });
        }

        let amount = compute_discount_amount(cart.total_with_tax, settings.percent);
        let new_rule = NewCartRule::bank_wire_discount(cart, settings.percent);

        let created = match self.cart_rule_repository.create_cart_rule(new_rule).await {
            Ok(rule) => rule,
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                // A concurrent request created the rule between our check and
                // this insert; surface it as already applied.
                let stored = self
                    .find_existing_discount(cart)?
                    .map(|rule| rule.value)
                    .unwrap_or(amount);
                return Ok(ApplyOutcome::AlreadyApplied { amount: stored });
            }
            Err(err) => {
                error!(
                    "Failed to create bank-wire cart rule for cart {}: {}",
                    cart.id, err
                );
                return Ok(ApplyOutcome::NotApplied {
                    reason: SkipReason::CreateFailed,
                });
            }
        };

        if let Err(err) = self
            .cart_repository
            .attach_rule(&cart.id, &created.id, amount)
            .await
        {
            error!(
                "Failed to attach cart rule {} to cart {}: {}",
                created.id, cart.id, err
            );
            return Ok(ApplyOutcome::NotApplied {
                reason: SkipReason::CreateFailed,
            });
        }

        Ok(ApplyOutcome::Applied { amount })
    }
}
