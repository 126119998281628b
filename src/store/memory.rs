//! In-memory discount store
//!
//! Mirrors the conditional semantics of the Postgres store under a
//! single mutex. Used by tests and storage-free local runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::DiscountCode;
use crate::store::DiscountStore;
use crate::{DiscountError, Result};

#[derive(Clone, Default)]
pub struct MemoryDiscountStore {
    records: Arc<Mutex<HashMap<String, DiscountCode>>>,
}

impl MemoryDiscountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiscountStore for MemoryDiscountStore {
    async fn get(&self, code: &str) -> Result<Option<DiscountCode>> {
        let records = self.records.lock().map_err(|e| DiscountError::Storage(e.to_string()))?;
        Ok(records.get(code).cloned())
    }

    async fn create(&self, record: &DiscountCode) -> Result<()> {
        let mut records = self.records.lock().map_err(|e| DiscountError::Storage(e.to_string()))?;
        if records.contains_key(&record.code) {
            return Err(DiscountError::CodeAlreadyExists);
        }
        records.insert(record.code.clone(), record.clone());
        Ok(())
    }

    async fn deactivate(&self, code: &str) -> Result<()> {
        let mut records = self.records.lock().map_err(|e| DiscountError::Storage(e.to_string()))?;
        let record = records.get_mut(code).ok_or(DiscountError::CodeNotFound)?;
        record.is_active = false;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn consume(&self, code: &str) -> Result<Option<DiscountCode>> {
        let mut records = self.records.lock().map_err(|e| DiscountError::Storage(e.to_string()))?;
        let now = Utc::now();
        match records.get_mut(code) {
            Some(r) if r.is_active && !r.is_exhausted() && !r.is_expired(now) => {
                r.usage_count += 1;
                r.updated_at = now;
                Ok(Some(r.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn code(code: &str, days_until_expiry: i64) -> DiscountCode {
        DiscountCode::new(code, dec!(10), Utc::now() + Duration::days(days_until_expiry))
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate() {
        let store = MemoryDiscountStore::new();
        store.create(&code("A", 1)).await.unwrap();
        assert!(matches!(
            store.create(&code("A", 1)).await,
            Err(DiscountError::CodeAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_consume_is_conditional() {
        let store = MemoryDiscountStore::new();
        store.create(&code("A", 1)).await.unwrap();

        let first = store.consume("A").await.unwrap().unwrap();
        assert_eq!(first.usage_count, 1);
        // limit reached, second consume refuses
        assert!(store.consume("A").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_refuses_expired_and_missing() {
        let store = MemoryDiscountStore::new();
        store.create(&code("OLD", -1)).await.unwrap();
        assert!(store.consume("OLD").await.unwrap().is_none());
        assert!(store.consume("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deactivate_only_flips_flag() {
        let store = MemoryDiscountStore::new();
        store.create(&code("A", 1)).await.unwrap();
        store.deactivate("A").await.unwrap();

        let r = store.get("A").await.unwrap().unwrap();
        assert!(!r.is_active);
        assert_eq!(r.usage_count, 0);
        assert!(matches!(
            store.deactivate("MISSING").await,
            Err(DiscountError::CodeNotFound)
        ));
    }
}
