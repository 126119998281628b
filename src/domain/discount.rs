//! DiscountCode entity
//!
//! Identity is the code string itself: unique, immutable, case-sensitive
//! exact match. Codes are never deleted; once deactivated they remain as
//! historical records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    pub discount_value: Decimal,
    pub expiration_date: DateTime<Utc>,
    pub is_active: bool,
    pub usage_limit: i32,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscountCode {
    /// A fresh single-use code, active and unused.
    pub fn new(code: impl Into<String>, discount_value: Decimal, expiration_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            code: code.into(),
            discount_value,
            expiration_date,
            is_active: true,
            usage_limit: 1,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration_date
    }

    pub fn is_exhausted(&self) -> bool {
        self.usage_count >= self.usage_limit
    }
}

/// Payload returned by a successful validation or redemption.
///
/// `current_usage` is the count before any increment performed by the
/// caller, matching what a pure validation would have observed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedDiscount {
    pub discount_value: Decimal,
    pub expiration_date: DateTime<Utc>,
    pub usage_limit: i32,
    pub current_usage: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_code_is_active_and_unused() {
        let c = DiscountCode::new("SAVE10", dec!(10), Utc::now() + Duration::days(30));
        assert!(c.is_active);
        assert_eq!(c.usage_limit, 1);
        assert_eq!(c.usage_count, 0);
        assert!(!c.is_expired(Utc::now()));
        assert!(!c.is_exhausted());
    }

    #[test]
    fn test_expiry_boundary() {
        let c = DiscountCode::new("X", dec!(5), Utc::now() - Duration::seconds(1));
        assert!(c.is_expired(Utc::now()));
        // exactly at the expiration instant counts as expired
        assert!(c.is_expired(c.expiration_date));
    }

    #[test]
    fn test_exhaustion() {
        let mut c = DiscountCode::new("X", dec!(5), Utc::now() + Duration::days(1));
        c.usage_count = 1;
        assert!(c.is_exhausted());
    }
}
