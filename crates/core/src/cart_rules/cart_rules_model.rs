//! Promotional cart-rule domain models.

use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::carts::Cart;
use crate::constants::{CART_RULE_PREFIX, RULE_VALIDITY_HOURS};

/// A persisted promotional rule.
///
/// Created once per cart, never updated; expires through its validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRule {
    pub id: String,
    pub code: String,
    pub name: String,
    pub customer_id: Option<String>,
    pub reduction_percent: Decimal,
    pub currency: String,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub quantity: i32,
    pub quantity_per_user: i32,
    pub minimum_amount: Decimal,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new cart rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartRule {
    pub code: String,
    pub name: String,
    pub customer_id: Option<String>,
    pub reduction_percent: Decimal,
    pub currency: String,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub quantity: i32,
    pub quantity_per_user: i32,
    pub minimum_amount: Decimal,
    pub active: bool,
}

impl NewCartRule {
    /// Build the bank-wire discount rule for a cart.
    ///
    /// The code carries the fixed prefix plus the cart id, the rule is
    /// restricted to the cart's customer when one exists, and it is valid
    /// from now through the configured window.
    pub fn bank_wire_discount(cart: &Cart, percent: Decimal) -> Self {
        let now = Utc::now().naive_utc();
        NewCartRule {
            code: format!("{}{}", CART_RULE_PREFIX, cart.id),
            name: format!("Bank Wire Discount ({}%)", percent),
            customer_id: cart.customer_id.clone(),
            reduction_percent: percent,
            currency: cart.currency.clone(),
            valid_from: now,
            valid_to: now + Duration::hours(RULE_VALIDITY_HOURS),
            quantity: 1,
            quantity_per_user: 1,
            minimum_amount: Decimal::ZERO,
            active: true,
        }
    }
}
