//! The persistence cascade.
//!
//! [`OrderService::save`] walks the configured tiers in order, giving each
//! one a full retry budget before falling through to the next. The local
//! queue is always the final tier, so a submission only fails outright when
//! even the local disk refuses the write.

use std::sync::Arc;

use tracing::{info, warn};

use otomono_core::{Money, Order, OrderDraft, OrderId, OrderStatus};

use crate::error::{OrderError, StoreError};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::store::{LocalQueue, OrderStore};

/// Outcome of one [`OrderService::sync_pending`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Records promoted to the primary store and removed from the queue.
    pub synced: usize,
    /// Records that stayed queued for the next pass.
    pub failed: usize,
}

impl SyncReport {
    /// Whether this pass touched any queued record.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.synced + self.failed
    }
}

/// Orchestrates order persistence across the tier cascade.
#[derive(Clone)]
pub struct OrderService {
    inner: Arc<Inner>,
}

struct Inner {
    /// Tiers in fallback order; the last entry is the queue.
    tiers: Vec<Arc<dyn OrderStore>>,
    /// Preferred destination for reads, status updates, and sync promotion.
    primary: Arc<dyn OrderStore>,
    queue: Arc<LocalQueue>,
    unit_price: Money,
    retry: RetryPolicy,
}

impl OrderService {
    /// Build a service over the given hosted tiers and local queue.
    ///
    /// `hosted` is tried in the order given; the queue is appended as the
    /// final tier. The first hosted tier (or the queue, if none) is the
    /// primary used for reads and sync promotion.
    #[must_use]
    pub fn new(hosted: Vec<Arc<dyn OrderStore>>, queue: Arc<LocalQueue>, unit_price: Money) -> Self {
        Self::with_retry(hosted, queue, unit_price, RetryPolicy::default())
    }

    /// Same as [`OrderService::new`] with an explicit retry policy.
    #[must_use]
    pub fn with_retry(
        hosted: Vec<Arc<dyn OrderStore>>,
        queue: Arc<LocalQueue>,
        unit_price: Money,
        retry: RetryPolicy,
    ) -> Self {
        let queue_store: Arc<dyn OrderStore> = Arc::clone(&queue) as Arc<dyn OrderStore>;
        let primary = hosted.first().cloned().unwrap_or_else(|| Arc::clone(&queue_store));
        let mut tiers = hosted;
        tiers.push(queue_store);
        Self {
            inner: Arc::new(Inner {
                tiers,
                primary,
                queue,
                unit_price,
                retry,
            }),
        }
    }

    /// Unit price applied to every order line.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.inner.unit_price
    }

    /// The local queue backing the final tier.
    #[must_use]
    pub fn queue(&self) -> &Arc<LocalQueue> {
        &self.inner.queue
    }

    /// Validate a submission and persist it through the cascade.
    ///
    /// Tiers are tried strictly in order; each gets the full retry budget
    /// before the next is attempted. The returned order carries the tier
    /// that accepted it in `savedTo`.
    ///
    /// # Errors
    ///
    /// [`OrderError::Validation`] before any tier is touched, or
    /// [`OrderError::Exhausted`] when every tier, queue included, failed.
    pub async fn save(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let order = Order::from_draft(draft, self.inner.unit_price)?;
        let mut last: Option<(otomono_core::StorageTier, StoreError)> = None;
        for store in &self.inner.tiers {
            let tier = store.tier();
            let tagged = order.saved_to(tier);
            let attempt = retry_with_backoff(self.inner.retry, || {
                let store = Arc::clone(store);
                let tagged = tagged.clone();
                async move { store.put(&tagged).await }
            })
            .await;
            match attempt {
                Ok(()) => {
                    info!(order_id = %tagged.order_id, tier = %tier, "order persisted");
                    return Ok(tagged);
                }
                Err(err) => {
                    warn!(order_id = %order.order_id, tier = %tier, error = %err, "tier failed, falling through");
                    last = Some((tier, err));
                }
            }
        }
        // Unreachable with a non-empty tier list, but stay honest.
        let (tier, source) = last.ok_or(OrderError::Exhausted {
            tier: otomono_core::StorageTier::LocalQueue,
            source: StoreError::NotFound("no storage tiers configured".to_string()),
        })?;
        Err(OrderError::Exhausted { tier, source })
    }

    /// Promote queued orders to the primary store, one record at a time.
    ///
    /// Each record is removed from the queue only after its own write
    /// succeeds; a failure leaves that record queued and moves on, so one
    /// bad record never blocks the rest.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Store`] only when the queue itself cannot be
    /// read. Individual promotion failures are counted, not raised.
    pub async fn sync_pending(&self) -> Result<SyncReport, OrderError> {
        let pending = self.inner.queue.list().await.map_err(|source| OrderError::Store {
            tier: self.inner.queue.tier(),
            source,
        })?;
        if pending.is_empty() {
            return Ok(SyncReport::default());
        }
        info!(pending = pending.len(), "syncing queued orders");
        let mut report = SyncReport::default();
        for order in pending {
            let promoted = order.saved_to(self.inner.primary.tier());
            match self.inner.primary.put(&promoted).await {
                Ok(()) => match self.inner.queue.remove(&order.order_id).await {
                    Ok(()) => {
                        info!(order_id = %order.order_id, "queued order promoted");
                        report.synced += 1;
                    }
                    Err(err) => {
                        // Promoted but still queued; the idempotent put will
                        // absorb the replay on the next pass.
                        warn!(order_id = %order.order_id, error = %err, "promoted order not removed from queue");
                        report.failed += 1;
                    }
                },
                Err(err) => {
                    warn!(order_id = %order.order_id, error = %err, "queued order still pending");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    /// List orders from the first tier that answers with a non-empty set.
    ///
    /// Hosted tiers may legitimately be empty while the queue holds strays,
    /// so an empty answer falls through instead of terminating the chain.
    ///
    /// # Errors
    ///
    /// Returns the last tier's [`OrderError::Store`] when every tier fails.
    pub async fn list(&self) -> Result<Vec<Order>, OrderError> {
        let mut last: Option<OrderError> = None;
        for store in &self.inner.tiers {
            match store.list().await {
                Ok(orders) if !orders.is_empty() => return Ok(orders),
                Ok(_) => {}
                Err(source) => {
                    let tier = store.tier();
                    warn!(tier = %tier, error = %source, "listing failed, trying next tier");
                    last = Some(OrderError::Store { tier, source });
                }
            }
        }
        match last {
            Some(err) => Err(err),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch one order from the primary store, falling back through the
    /// remaining tiers when it is absent or unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Store`] when every tier errored.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let mut last: Option<OrderError> = None;
        for store in &self.inner.tiers {
            match store.get(id).await {
                Ok(Some(order)) => return Ok(Some(order)),
                Ok(None) => {}
                Err(source) => {
                    last = Some(OrderError::Store {
                        tier: store.tier(),
                        source,
                    });
                }
            }
        }
        match last {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    /// Apply a status transition on the primary store.
    ///
    /// The transition itself is not policed here; the admin surface checks
    /// [`OrderStatus::can_transition_to`] before calling.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Store`] when the primary write fails.
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), OrderError> {
        let now = chrono::Utc::now();
        self.inner
            .primary
            .set_status(id, status, now)
            .await
            .map_err(|source| OrderError::Store {
                tier: self.inner.primary.tier(),
                source,
            })?;
        info!(order_id = %id, status = %status, "order status updated");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Mutex;

    use otomono_core::StorageTier;

    use super::*;

    /// In-memory tier that can be flipped healthy or failing.
    struct FakeStore {
        tier: StorageTier,
        healthy: AtomicBool,
        puts: AtomicU32,
        orders: Mutex<Vec<Order>>,
    }

    impl FakeStore {
        fn new(tier: StorageTier, healthy: bool) -> Arc<Self> {
            Arc::new(Self {
                tier,
                healthy: AtomicBool::new(healthy),
                puts: AtomicU32::new(0),
                orders: Mutex::new(Vec::new()),
            })
        }

        fn set_healthy(&self, healthy: bool) {
            self.healthy.store(healthy, Ordering::SeqCst);
        }

        fn put_count(&self) -> u32 {
            self.puts.load(Ordering::SeqCst)
        }

        async fn stored(&self) -> Vec<Order> {
            self.orders.lock().await.clone()
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.healthy.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(StoreError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
            }
        }
    }

    #[async_trait]
    impl OrderStore for FakeStore {
        fn tier(&self) -> StorageTier {
            self.tier
        }

        async fn put(&self, order: &Order) -> Result<(), StoreError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            let mut orders = self.orders.lock().await;
            orders.retain(|o| o.order_id != order.order_id);
            orders.push(order.clone());
            Ok(())
        }

        async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
            self.check()?;
            Ok(self
                .orders
                .lock()
                .await
                .iter()
                .find(|o| o.order_id == *id)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<Order>, StoreError> {
            self.check()?;
            Ok(self.orders.lock().await.clone())
        }

        async fn set_status(
            &self,
            id: &OrderId,
            status: OrderStatus,
            updated_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            self.check()?;
            let mut orders = self.orders.lock().await;
            let order = orders
                .iter_mut()
                .find(|o| o.order_id == *id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            order.status = status;
            order.updated_at = updated_at;
            Ok(())
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            customer_name: "Jordan Vega".to_string(),
            customer_email: "jordan@example.com".to_string(),
            quantity: 2,
            material_preference: "mesh".to_string(),
            design: None,
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    fn service(
        primary: &Arc<FakeStore>,
        secondary: &Arc<FakeStore>,
        dir: &tempfile::TempDir,
    ) -> OrderService {
        let queue = Arc::new(LocalQueue::new(dir.path().join("pending-orders.json")));
        OrderService::with_retry(
            vec![
                Arc::clone(primary) as Arc<dyn OrderStore>,
                Arc::clone(secondary) as Arc<dyn OrderStore>,
            ],
            queue,
            Money::from_dollars(25),
            fast_retry(),
        )
    }

    #[tokio::test]
    async fn test_healthy_primary_takes_the_order() {
        let primary = FakeStore::new(StorageTier::DocumentStore, true);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let order = service.save(draft()).await.unwrap();
        assert_eq!(order.saved_to, Some(StorageTier::DocumentStore));
        assert_eq!(primary.put_count(), 1);
        assert_eq!(secondary.put_count(), 0);
        assert!(service.queue().is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_validation_rejects_before_any_backend_call() {
        let primary = FakeStore::new(StorageTier::DocumentStore, true);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let mut bad = draft();
        bad.customer_email.clear();
        let err = service.save(bad).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
        assert_eq!(primary.put_count(), 0);
        assert_eq!(secondary.put_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_primary_falls_to_secondary() {
        let primary = FakeStore::new(StorageTier::DocumentStore, false);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let order = service.save(draft()).await.unwrap();
        assert_eq!(order.saved_to, Some(StorageTier::RealtimeStore));
        // Full retry budget spent on the primary before falling through.
        assert_eq!(primary.put_count(), 3);
        assert_eq!(secondary.put_count(), 1);
        assert!(service.queue().is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_both_hosted_down_lands_in_queue() {
        let primary = FakeStore::new(StorageTier::DocumentStore, false);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, false);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let order = service.save(draft()).await.unwrap();
        assert_eq!(order.saved_to, Some(StorageTier::LocalQueue));
        assert_eq!(primary.put_count(), 3);
        assert_eq!(secondary.put_count(), 3);
        assert_eq!(service.queue().len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sync_promotes_and_drains_queue() {
        let primary = FakeStore::new(StorageTier::DocumentStore, false);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, false);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let queued = service.save(draft()).await.unwrap();
        assert_eq!(queued.saved_to, Some(StorageTier::LocalQueue));

        primary.set_healthy(true);
        let report = service.sync_pending().await.unwrap();
        assert_eq!(report, SyncReport { synced: 1, failed: 0 });
        assert!(service.queue().is_empty().await.unwrap());

        // Promotion keeps the canonical ID and retags savedTo.
        let stored = primary.stored().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].order_id, queued.order_id);
        assert_eq!(stored[0].saved_to, Some(StorageTier::DocumentStore));
    }

    #[tokio::test]
    async fn test_sync_keeps_failed_records_queued() {
        let primary = FakeStore::new(StorageTier::DocumentStore, false);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, false);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        service.save(draft()).await.unwrap();
        service.save(draft()).await.unwrap();

        let report = service.sync_pending().await.unwrap();
        assert_eq!(report, SyncReport { synced: 0, failed: 2 });
        assert_eq!(service.queue().len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sync_with_empty_queue_is_a_no_op() {
        let primary = FakeStore::new(StorageTier::DocumentStore, true);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let report = service.sync_pending().await.unwrap();
        assert_eq!(report.attempted(), 0);
        assert_eq!(primary.put_count(), 0);
    }

    #[tokio::test]
    async fn test_list_falls_through_empty_tiers() {
        let primary = FakeStore::new(StorageTier::DocumentStore, false);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let order = service.save(draft()).await.unwrap();
        assert_eq!(order.saved_to, Some(StorageTier::RealtimeStore));

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order_id, order.order_id);
    }

    #[tokio::test]
    async fn test_update_status_hits_primary() {
        let primary = FakeStore::new(StorageTier::DocumentStore, true);
        let secondary = FakeStore::new(StorageTier::RealtimeStore, true);
        let dir = tempfile::tempdir().unwrap();
        let service = service(&primary, &secondary, &dir);

        let order = service.save(draft()).await.unwrap();
        service
            .update_status(&order.order_id, OrderStatus::Processing)
            .await
            .unwrap();
        let stored = primary.stored().await;
        assert_eq!(stored[0].status, OrderStatus::Processing);
    }
}
