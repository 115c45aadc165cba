//! Storage tier adapters.
//!
//! Every tier exposes the same small [`OrderStore`] capability so the
//! cascade can iterate an ordered list and short-circuit on first success.

mod document;
mod local;
mod realtime;

pub use document::{DocumentStore, DocumentStoreConfig};
pub use local::LocalQueue;
pub use realtime::{RealtimeStore, RealtimeStoreConfig};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use otomono_core::{Order, OrderId, OrderStatus, StorageTier};

use crate::error::StoreError;

/// Uniform write/read capability of one storage tier.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Which tier this adapter is.
    fn tier(&self) -> StorageTier;

    /// Persist an order under its canonical ID.
    ///
    /// Writes are idempotent: putting the same order twice overwrites the
    /// same document, so sync replays cannot duplicate records.
    async fn put(&self, order: &Order) -> Result<(), StoreError>;

    /// Fetch a single order by ID, if this tier holds it.
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// List all orders held by this tier, newest first.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Update an order's lifecycle status and `lastUpdated` stamp.
    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Sort orders newest-first by creation time.
pub(crate) fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
