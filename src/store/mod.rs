//! Durable storage for discount codes
//!
//! Every operation is a round trip to the backing store; there is no
//! in-process caching. The conditional semantics of `create` and
//! `consume` are load-bearing for the engine's invariants and must be
//! honored by any backend.

use async_trait::async_trait;

use crate::domain::DiscountCode;
use crate::Result;

mod memory;
mod postgres;

pub use memory::MemoryDiscountStore;
pub use postgres::PgDiscountStore;

#[async_trait]
pub trait DiscountStore: Send + Sync {
    /// Fetches a record by its code, exact match.
    async fn get(&self, code: &str) -> Result<Option<DiscountCode>>;

    /// Inserts a new record. Atomic conditional create: fails with
    /// `CodeAlreadyExists` if the code is present, and two concurrent
    /// creates for one code must not both succeed.
    async fn create(&self, record: &DiscountCode) -> Result<()>;

    /// Sets `is_active = false` and refreshes `updated_at`, leaving all
    /// other fields untouched. Fails with `CodeNotFound` if absent.
    /// Callers on a read path treat this as a best-effort correction.
    async fn deactivate(&self, code: &str) -> Result<()>;

    /// Consumes one usage unit in a single atomic conditional update:
    /// increments `usage_count` iff the code is active, unexpired, and
    /// below its usage limit. Returns the post-increment record, or
    /// `None` when the precondition does not hold (including when the
    /// code is absent). This is the only way usage is ever incremented.
    async fn consume(&self, code: &str) -> Result<Option<DiscountCode>>;
}
