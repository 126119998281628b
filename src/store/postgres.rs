//! Postgres-backed discount store

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::DiscountCode;
use crate::store::DiscountStore;
use crate::{DiscountError, Result};

#[derive(Clone)]
pub struct PgDiscountStore {
    pool: PgPool,
}

impl PgDiscountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_err(e: sqlx::Error) -> DiscountError {
    DiscountError::Storage(e.to_string())
}

#[async_trait]
impl DiscountStore for PgDiscountStore {
    async fn get(&self, code: &str) -> Result<Option<DiscountCode>> {
        sqlx::query_as::<_, DiscountCode>("SELECT * FROM discount_codes WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)
    }

    async fn create(&self, record: &DiscountCode) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO discount_codes \
             (code, discount_value, expiration_date, is_active, usage_limit, usage_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW()) \
             ON CONFLICT (code) DO NOTHING",
        )
        .bind(&record.code)
        .bind(record.discount_value)
        .bind(record.expiration_date)
        .bind(record.is_active)
        .bind(record.usage_limit)
        .bind(record.usage_count)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(DiscountError::CodeAlreadyExists);
        }
        Ok(())
    }

    async fn deactivate(&self, code: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE discount_codes SET is_active = FALSE, updated_at = NOW() WHERE code = $1",
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(DiscountError::CodeNotFound);
        }
        Ok(())
    }

    async fn consume(&self, code: &str) -> Result<Option<DiscountCode>> {
        // Single statement so two concurrent redemptions of a code with one
        // remaining use cannot both pass the precondition.
        sqlx::query_as::<_, DiscountCode>(
            "UPDATE discount_codes \
             SET usage_count = usage_count + 1, updated_at = NOW() \
             WHERE code = $1 \
               AND is_active \
               AND usage_count < usage_limit \
               AND expiration_date > NOW() \
             RETURNING *",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)
    }
}
