use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{CartRuleDB, NewCartRuleDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::cart_rules;
use bankwire_discount_core::cart_rules::{CartRule, CartRuleRepositoryTrait, NewCartRule};
use bankwire_discount_core::errors::Result;

pub struct CartRuleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CartRuleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CartRuleRepository { pool, writer }
    }

    /// Look up a rule by its code.
    pub fn get_cart_rule_by_code(&self, code: &str) -> Result<Option<CartRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rule_db = cart_rules::table
            .filter(cart_rules::code.eq(code))
            .first::<CartRuleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(rule_db.map(CartRule::from))
    }
}

#[async_trait]
impl CartRuleRepositoryTrait for CartRuleRepository {
    async fn create_cart_rule(&self, new_rule: NewCartRule) -> Result<CartRule> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CartRule> {
                let mut new_rule_db: NewCartRuleDB = new_rule.into();
                new_rule_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(cart_rules::table)
                    .values(&new_rule_db)
                    .returning(CartRuleDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CartRule::from(result_db))
            })
            .await
    }
}
