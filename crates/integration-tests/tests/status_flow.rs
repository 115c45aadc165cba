//! Order lifecycle updates against the primary tier over real HTTP.

use std::sync::Arc;

use otomono_core::{Money, OrderId, OrderStatus, StorageTier};
use otomono_orders::{DocumentStore, LocalQueue, OrderError, OrderService, OrderStore, StoreError};

use otomono_integration_tests::{MockDocumentBackend, draft, fast_retry};

async fn service(docs: &MockDocumentBackend, dir: &tempfile::TempDir) -> OrderService {
    let hosted: Vec<Arc<dyn OrderStore>> =
        vec![Arc::new(DocumentStore::new(docs.config(), "orders"))];
    let queue = Arc::new(LocalQueue::new(dir.path().join("pending-orders.json")));
    OrderService::with_retry(hosted, queue, Money::from_dollars(25), fast_retry())
}

#[tokio::test]
async fn test_status_update_patches_the_stored_document() {
    let docs = MockDocumentBackend::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service(&docs, &dir).await;

    let saved = service.save(draft("Jordan Vega")).await.expect("save");
    assert_eq!(
        docs.document("orders", saved.order_id.as_str()).expect("doc")["status"],
        "pending"
    );

    service
        .update_status(&saved.order_id, OrderStatus::Processing)
        .await
        .expect("update");

    let doc = docs
        .document("orders", saved.order_id.as_str())
        .expect("doc");
    assert_eq!(doc["status"], "processing");
    // The patch must move the update timestamp, not the creation one.
    assert_eq!(doc["createdAt"], serde_json::to_value(saved.created_at).expect("ts"));
    assert_ne!(doc["lastUpdated"], serde_json::to_value(saved.updated_at).expect("ts"));
}

#[tokio::test]
async fn test_status_update_on_missing_order_is_not_found() {
    let docs = MockDocumentBackend::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service(&docs, &dir).await;

    let missing = OrderId::from_string("ORD-0-MISSING".to_string());
    let err = service
        .update_status(&missing, OrderStatus::Processing)
        .await
        .expect_err("missing order");
    assert!(matches!(
        err,
        OrderError::Store {
            tier: StorageTier::DocumentStore,
            source: StoreError::NotFound(_),
        }
    ));
}

#[tokio::test]
async fn test_fetch_round_trips_through_the_primary() {
    let docs = MockDocumentBackend::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service(&docs, &dir).await;

    let saved = service.save(draft("Mika Aalto")).await.expect("save");
    let fetched = service
        .get(&saved.order_id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(fetched.order_id, saved.order_id);
    assert_eq!(fetched.customer_name, "Mika Aalto");
    assert_eq!(fetched.saved_to, Some(StorageTier::DocumentStore));
}
