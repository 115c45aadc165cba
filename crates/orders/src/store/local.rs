//! Last-resort tier: durable local JSON queue.
//!
//! Orders land here when both hosted tiers are unreachable. The queue is a
//! single JSON array on disk, rewritten atomically (temp file then rename)
//! so a crash mid-write never corrupts queued orders.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use otomono_core::{Order, OrderId, OrderStatus, StorageTier};

use crate::error::StoreError;
use crate::store::{OrderStore, sort_newest_first};

/// Durable on-disk queue of orders awaiting promotion to a hosted tier.
pub struct LocalQueue {
    path: PathBuf,
    // Serializes read-modify-write cycles on the queue file.
    lock: Mutex<()>,
}

impl LocalQueue {
    /// Open a queue backed by the given file. The file is created on first
    /// write; a missing file reads as an empty queue.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of queued orders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the queue file cannot be read or parsed.
    pub async fn len(&self) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.len())
    }

    /// Whether the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the queue file cannot be read or parsed.
    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }

    /// Remove one order from the queue, by ID. Removing an absent ID is a
    /// no-op so sync replays stay idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read, parse, or write failure.
    pub async fn remove(&self, id: &OrderId) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut orders = self.read_all().await?;
        let before = orders.len();
        orders.retain(|order| order.order_id != *id);
        if orders.len() != before {
            self.write_all(&orders).await?;
            debug!(order_id = %id, remaining = orders.len(), "order removed from local queue");
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Order>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, orders: &[Order]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(orders)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for LocalQueue {
    fn tier(&self) -> StorageTier {
        StorageTier::LocalQueue
    }

    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut orders = self.read_all().await?;
        // Overwrite in place if the ID is already queued.
        match orders.iter_mut().find(|o| o.order_id == order.order_id) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        self.write_all(&orders).await?;
        debug!(order_id = %order.order_id, queued = orders.len(), "order queued locally");
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let _guard = self.lock.lock().await;
        let orders = self.read_all().await?;
        Ok(orders.into_iter().find(|order| order.order_id == *id))
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut orders = self.read_all().await?;
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut orders = self.read_all().await?;
        let Some(order) = orders.iter_mut().find(|order| order.order_id == *id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        order.status = status;
        order.updated_at = updated_at;
        self.write_all(&orders).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use otomono_core::{Money, OrderDraft};

    use super::*;

    fn draft(name: &str) -> OrderDraft {
        OrderDraft {
            customer_name: name.to_string(),
            customer_email: "jersey@example.com".to_string(),
            quantity: 2,
            material_preference: "polyester".to_string(),
            design: None,
        }
    }

    fn order(name: &str) -> Order {
        Order::from_draft(draft(name), Money::from_dollars(25)).unwrap()
    }

    fn queue(dir: &tempfile::TempDir) -> LocalQueue {
        LocalQueue::new(dir.path().join("pending-orders.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        assert!(queue.list().await.unwrap().is_empty());
        assert!(queue.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        let order = order("Dana");
        queue.put(&order).await.unwrap();
        let loaded = queue.get(&order.order_id).await.unwrap().unwrap();
        assert_eq!(loaded.customer_name, "Dana");
        assert_eq!(queue.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_same_id_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        let order = order("Dana");
        queue.put(&order).await.unwrap();
        queue.put(&order).await.unwrap();
        assert_eq!(queue.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        let first = order("Dana");
        let second = order("Eli");
        queue.put(&first).await.unwrap();
        queue.put(&second).await.unwrap();
        queue.remove(&first.order_id).await.unwrap();
        queue.remove(&first.order_id).await.unwrap();
        let remaining = queue.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].order_id, second.order_id);
    }

    #[tokio::test]
    async fn test_set_status_updates_record() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        let order = order("Dana");
        queue.put(&order).await.unwrap();
        let stamp = Utc::now();
        queue
            .set_status(&order.order_id, OrderStatus::Processing, stamp)
            .await
            .unwrap();
        let loaded = queue.get(&order.order_id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Processing);
        assert_eq!(loaded.updated_at, stamp);
    }

    #[tokio::test]
    async fn test_set_status_missing_id_errors() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(&dir);
        let result = queue
            .set_status(&OrderId::generate(), OrderStatus::Processing, Utc::now())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_queue_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let order = order("Dana");
        {
            let queue = queue(&dir);
            queue.put(&order).await.unwrap();
        }
        let reopened = queue(&dir);
        assert_eq!(reopened.len().await.unwrap(), 1);
    }
}
