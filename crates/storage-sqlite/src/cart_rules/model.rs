//! Database models for promotional cart rules.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal_tolerant;
use bankwire_discount_core::cart_rules::{CartRule, NewCartRule};

/// Database model for cart rules
#[derive(Queryable, Selectable, Insertable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_rules)]
#[serde(rename_all = "camelCase")]
pub struct CartRuleDB {
    pub id: String,
    pub code: String,
    pub name: String,
    pub customer_id: Option<String>,
    pub reduction_percent: String,
    pub currency: String,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub quantity: i32,
    pub quantity_per_user: i32,
    pub minimum_amount: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// Database model for creating cart rules
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_rules)]
#[serde(rename_all = "camelCase")]
pub struct NewCartRuleDB {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub customer_id: Option<String>,
    pub reduction_percent: String,
    pub currency: String,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub quantity: i32,
    pub quantity_per_user: i32,
    pub minimum_amount: String,
    pub active: bool,
}

impl From<CartRuleDB> for CartRule {
    fn from(db: CartRuleDB) -> Self {
        Self {
            reduction_percent: parse_decimal_tolerant(&db.reduction_percent, "reduction_percent"),
            minimum_amount: parse_decimal_tolerant(&db.minimum_amount, "minimum_amount"),
            id: db.id,
            code: db.code,
            name: db.name,
            customer_id: db.customer_id,
            currency: db.currency,
            valid_from: db.valid_from,
            valid_to: db.valid_to,
            quantity: db.quantity,
            quantity_per_user: db.quantity_per_user,
            active: db.active,
            created_at: db.created_at,
        }
    }
}

impl From<NewCartRule> for NewCartRuleDB {
    fn from(domain: NewCartRule) -> Self {
        Self {
            id: None,
            code: domain.code,
            name: domain.name,
            customer_id: domain.customer_id,
            reduction_percent: domain.reduction_percent.to_string(),
            currency: domain.currency,
            valid_from: domain.valid_from,
            valid_to: domain.valid_to,
            quantity: domain.quantity,
            quantity_per_user: domain.quantity_per_user,
            minimum_amount: domain.minimum_amount.to_string(),
            active: domain.active,
        }
    }
}
