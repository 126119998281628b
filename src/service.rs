//! Discount lifecycle operations
//!
//! Stateless logic over a [`DiscountStore`] handle. Enforces uniqueness,
//! expiry, and usage-limit invariants, and performs lazy deactivation of
//! expired or exhausted codes at validation time. There is no background
//! sweep: a code past its expiry stays `is_active = true` in storage
//! until something reads it, and redeemability is re-checked on every
//! read regardless of the stored flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DiscountCode, Percent, ValidatedDiscount};
use crate::store::DiscountStore;
use crate::{DiscountError, Result};

#[derive(Clone)]
pub struct DiscountService<S> {
    store: S,
}

impl<S: DiscountStore> DiscountService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a new single-use code.
    ///
    /// The code string is caller-chosen and becomes the record's
    /// identity; generation fails with `CodeAlreadyExists` rather than
    /// overwriting. Usage limit is fixed at 1.
    pub async fn generate(
        &self,
        code: &str,
        discount_value: Decimal,
        expiration_date: DateTime<Utc>,
    ) -> Result<DiscountCode> {
        if code.trim().is_empty() {
            return Err(DiscountError::invalid("code", "must be a non-empty string"));
        }
        let percent = Percent::new(discount_value)
            .map_err(|e| DiscountError::invalid("discountValue", e.to_string()))?;

        let record = DiscountCode::new(code, percent.value(), expiration_date);
        self.store.create(&record).await?;

        tracing::info!(code, %percent, "discount code generated");
        Ok(record)
    }

    /// Read-only redeemability check.
    ///
    /// Does not increment usage, but a read that finds the code expired
    /// or exhausted triggers a corrective deactivation write. That write
    /// is best-effort: its failure is logged and the rejection is
    /// reported to the caller either way.
    pub async fn validate(&self, code: &str) -> Result<ValidatedDiscount> {
        let record = self.fetch(code).await?;

        if record.is_expired(Utc::now()) {
            self.deactivate_lazily(&record.code).await;
            return Err(DiscountError::CodeExpired);
        }
        if !record.is_active {
            return Err(DiscountError::CodeInactive);
        }
        if record.is_exhausted() {
            self.deactivate_lazily(&record.code).await;
            return Err(DiscountError::UsageLimitReached);
        }

        Ok(payload(&record, record.usage_count))
    }

    /// Validates and consumes one usage unit.
    ///
    /// The increment is a single atomic conditional update at the store,
    /// so two concurrent redemptions of a code with one remaining use
    /// cannot both succeed. Returns the pre-increment usage count, i.e.
    /// what a validation immediately before the redemption observed.
    pub async fn redeem(&self, code: &str) -> Result<ValidatedDiscount> {
        if code.trim().is_empty() {
            return Err(DiscountError::invalid("code", "must be a non-empty string"));
        }

        match self.store.consume(code).await? {
            Some(record) => {
                tracing::info!(
                    code,
                    usage = record.usage_count,
                    limit = record.usage_limit,
                    "discount code redeemed"
                );
                Ok(payload(&record, record.usage_count - 1))
            }
            // The precondition failed. Redeemability only ever degrades
            // (usage grows, expiry passes, deactivation is terminal), so
            // validate classifies the refusal stably and performs the
            // lazy deactivation along the way.
            None => match self.validate(code).await {
                Err(e) => Err(e),
                // A concurrent redeem took the last unit between our two
                // store reads and its lazy deactivation hasn't landed yet.
                Ok(_) => Err(DiscountError::UsageLimitReached),
            },
        }
    }

    async fn fetch(&self, code: &str) -> Result<DiscountCode> {
        if code.trim().is_empty() {
            return Err(DiscountError::invalid("code", "must be a non-empty string"));
        }
        self.store.get(code).await?.ok_or(DiscountError::CodeNotFound)
    }

    async fn deactivate_lazily(&self, code: &str) {
        if let Err(e) = self.store.deactivate(code).await {
            tracing::warn!(code, error = %e, "lazy deactivation write failed");
        }
    }
}

fn payload(record: &DiscountCode, current_usage: i32) -> ValidatedDiscount {
    ValidatedDiscount {
        discount_value: record.discount_value,
        expiration_date: record.expiration_date,
        usage_limit: record.usage_limit,
        current_usage,
    }
}
