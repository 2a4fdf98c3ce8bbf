//! Database models for carts and the cart/rule attachment table.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal_tolerant;
use bankwire_discount_core::carts::Cart;

/// Database model for carts (owned by the order subsystem)
#[derive(
    Queryable, Selectable, Insertable, Identifiable, AsChangeset, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::carts)]
#[serde(rename_all = "camelCase")]
pub struct CartDB {
    pub id: String,
    pub session_id: String,
    pub customer_id: Option<String>,
    pub currency: String,
    pub total_with_tax: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for attaching a rule to a cart
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_cart_rules)]
pub struct NewCartCartRuleDB {
    pub cart_id: String,
    pub cart_rule_id: String,
    pub value: String,
}

impl From<CartDB> for Cart {
    fn from(db: CartDB) -> Self {
        Self {
            total_with_tax: parse_decimal_tolerant(&db.total_with_tax, "total_with_tax"),
            id: db.id,
            session_id: db.session_id,
            customer_id: db.customer_id,
            currency: db.currency,
        }
    }
}
