use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::{CartDB, NewCartCartRuleDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{cart_cart_rules, cart_rules, carts};
use crate::utils::parse_decimal_tolerant;
use bankwire_discount_core::carts::{AttachedCartRule, Cart, CartRepositoryTrait};
use bankwire_discount_core::errors::Result;

pub struct CartRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CartRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CartRepository { pool, writer }
    }

    /// Insert or refresh a cart row.
    ///
    /// The order subsystem owns carts; this is the ingestion point it (and
    /// the integration tests) use to mirror a cart into the plugin's store.
    pub async fn upsert_cart(&self, cart: &Cart) -> Result<()> {
        let now = Utc::now().naive_utc();
        let cart_db = CartDB {
            id: cart.id.clone(),
            session_id: cart.session_id.clone(),
            customer_id: cart.customer_id.clone(),
            currency: cart.currency.clone(),
            total_with_tax: cart.total_with_tax.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.writer
            .exec(move |conn| {
                // A plain REPLACE would delete the row and cascade away any
                // attached rules; update in place instead.
                diesel::insert_into(carts::table)
                    .values(&cart_db)
                    .on_conflict(carts::id)
                    .do_update()
                    .set(&cart_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    fn get_cart_by_session(&self, session: &str) -> Result<Option<Cart>> {
        let mut conn = get_connection(&self.pool)?;
        let cart_db = carts::table
            .filter(carts::session_id.eq(session))
            .order(carts::updated_at.desc())
            .first::<CartDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(cart_db.map(Cart::from))
    }

    fn get_attached_rules(&self, cart_id_param: &str) -> Result<Vec<AttachedCartRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = cart_cart_rules::table
            .inner_join(cart_rules::table)
            .filter(cart_cart_rules::cart_id.eq(cart_id_param))
            .order(cart_cart_rules::id.asc())
            .select((
                cart_cart_rules::cart_rule_id,
                cart_rules::code,
                cart_rules::reduction_percent,
                cart_cart_rules::value,
            ))
            .load::<(String, String, String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|(rule_id, code, percent, value)| AttachedCartRule {
                cart_rule_id: rule_id,
                code,
                reduction_percent: parse_decimal_tolerant(&percent, "reduction_percent"),
                value: parse_decimal_tolerant(&value, "value"),
            })
            .collect())
    }

    async fn attach_rule(&self, cart_id: &str, cart_rule_id: &str, value: Decimal) -> Result<()> {
        let attachment = NewCartCartRuleDB {
            cart_id: cart_id.to_string(),
            cart_rule_id: cart_rule_id.to_string(),
            value: value.to_string(),
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(cart_cart_rules::table)
                    .values(&attachment)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
