//! Persistence cascade tests over real HTTP against mock backends.
//!
//! These cover the behavior that matters during an outage: writes fall
//! through tier by tier, nothing is lost, and queued orders drain back to
//! the primary store once it recovers.

use std::sync::Arc;

use otomono_core::{OrderDraft, Money, StorageTier};
use otomono_orders::{
    DocumentStore, LocalQueue, OrderError, OrderService, OrderStore, RealtimeStore,
};

use otomono_integration_tests::{MockDocumentBackend, MockRealtimeBackend, draft, fast_retry};

struct Harness {
    docs: MockDocumentBackend,
    realtime: MockRealtimeBackend,
    queue: Arc<LocalQueue>,
    service: OrderService,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let docs = MockDocumentBackend::spawn().await;
    let realtime = MockRealtimeBackend::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let queue = Arc::new(LocalQueue::new(dir.path().join("pending-orders.json")));

    let hosted: Vec<Arc<dyn OrderStore>> = vec![
        Arc::new(DocumentStore::new(docs.config(), "orders")),
        Arc::new(RealtimeStore::new(realtime.config(), "orders")),
    ];
    let service = OrderService::with_retry(
        hosted,
        Arc::clone(&queue),
        Money::from_dollars(25),
        fast_retry(),
    );

    Harness {
        docs,
        realtime,
        queue,
        service,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_healthy_primary_takes_the_order() {
    let h = harness().await;

    let saved = h.service.save(draft("Jordan Vega")).await.expect("save");
    assert_eq!(saved.saved_to, Some(StorageTier::DocumentStore));

    let doc = h
        .docs
        .document("orders", saved.order_id.as_str())
        .expect("order in document store");
    assert_eq!(doc["savedTo"], "document-store");
    assert_eq!(doc["customerName"], "Jordan Vega");
    assert_eq!(
        doc["totalAmount"],
        serde_json::to_value(saved.total_amount).expect("total json")
    );

    assert!(h.realtime.record(saved.order_id.as_str()).is_none());
    assert_eq!(h.queue.len().await.expect("queue len"), 0);
}

#[tokio::test]
async fn test_primary_outage_falls_to_realtime() {
    let h = harness().await;
    h.docs.set_healthy(false);

    let saved = h.service.save(draft("Mika Aalto")).await.expect("save");
    assert_eq!(saved.saved_to, Some(StorageTier::RealtimeStore));

    let record = h
        .realtime
        .record(saved.order_id.as_str())
        .expect("order in realtime store");
    assert_eq!(record["savedTo"], "realtime-store");
    assert!(h.docs.document("orders", saved.order_id.as_str()).is_none());
    assert_eq!(h.queue.len().await.expect("queue len"), 0);
}

#[tokio::test]
async fn test_total_outage_queues_locally_and_sync_drains() {
    let h = harness().await;
    h.docs.set_healthy(false);
    h.realtime.set_healthy(false);

    let saved = h.service.save(draft("Ana Sosa")).await.expect("save");
    assert_eq!(saved.saved_to, Some(StorageTier::LocalQueue));
    assert_eq!(h.queue.len().await.expect("queue len"), 1);

    // Backend recovers; the queued order drains to the primary store.
    h.docs.set_healthy(true);
    let report = h.service.sync_pending().await.expect("sync");
    assert_eq!(report.synced, 1);
    assert_eq!(report.failed, 0);

    let doc = h
        .docs
        .document("orders", saved.order_id.as_str())
        .expect("promoted order");
    assert_eq!(doc["orderId"], saved.order_id.as_str());
    assert_eq!(doc["savedTo"], "document-store");
    assert_eq!(h.queue.len().await.expect("queue len"), 0);
}

#[tokio::test]
async fn test_sync_keeps_failed_orders_queued() {
    let h = harness().await;
    h.docs.set_healthy(false);
    h.realtime.set_healthy(false);

    h.service.save(draft("Ravi Nair")).await.expect("save");

    // Primary still down, the order must survive the failed pass.
    let report = h.service.sync_pending().await.expect("sync");
    assert_eq!(report.synced, 0);
    assert_eq!(report.failed, 1);
    assert_eq!(h.queue.len().await.expect("queue len"), 1);
}

#[tokio::test]
async fn test_validation_happens_before_any_backend_write() {
    let h = harness().await;

    let mut bad = draft("Jordan Vega");
    bad.customer_email = String::new();
    let err = h.service.save(bad).await.expect_err("rejected");
    assert!(matches!(err, OrderError::Validation(_)));

    assert_eq!(h.docs.collection_len("orders"), 0);
    assert_eq!(h.queue.len().await.expect("queue len"), 0);
}

#[tokio::test]
async fn test_listing_falls_through_a_failing_primary() {
    let h = harness().await;

    // Seed the secondary tier directly, then take the primary down.
    let realtime_store = RealtimeStore::new(h.realtime.config(), "orders");
    let order = otomono_core::Order::from_draft(draft("Noor Haddad"), Money::from_dollars(25))
        .expect("order")
        .saved_to(StorageTier::RealtimeStore);
    realtime_store.put(&order).await.expect("seed realtime");
    h.docs.set_healthy(false);

    let listed = h.service.list().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].order_id, order.order_id);
}

#[tokio::test]
async fn test_get_falls_back_to_the_queue() {
    let h = harness().await;
    h.docs.set_healthy(false);
    h.realtime.set_healthy(false);

    let saved = h.service.save(draft("Iris Chen")).await.expect("save");
    let fetched = h
        .service
        .get(&saved.order_id)
        .await
        .expect("get")
        .expect("queued order visible");
    assert_eq!(fetched.saved_to, Some(StorageTier::LocalQueue));
}

#[tokio::test]
async fn test_rejects_draft_with_zero_quantity() {
    let h = harness().await;
    let mut bad: OrderDraft = draft("Jordan Vega");
    bad.quantity = 0;
    let err = h.service.save(bad).await.expect_err("rejected");
    assert!(matches!(err, OrderError::Validation(_)));
}
