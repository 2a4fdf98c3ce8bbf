//! Cart domain models.
//!
//! Carts are owned by the order subsystem; this service only reads them
//! and attaches promotional rules to them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer's in-progress, unpurchased order aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    /// Ambient session the cart belongs to.
    pub session_id: String,
    /// `None` for guest carts.
    pub customer_id: Option<String>,
    /// ISO currency code, e.g. "EUR".
    pub currency: String,
    /// Order total including tax, as computed by the order subsystem.
    pub total_with_tax: Decimal,
}

/// A cart's view of one attached promotional rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedCartRule {
    pub cart_rule_id: String,
    pub code: String,
    pub reduction_percent: Decimal,
    /// Monetary reduction captured when the rule was attached.
    pub value: Decimal,
}
