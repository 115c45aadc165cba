//! Integration test support for Otomono.
//!
//! Spawns in-process mock versions of the hosted backends so the cascade
//! can be exercised over real HTTP, outages included.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p otomono-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cascade` - Persistence fallback across tiers
//! - `status_flow` - Order lifecycle updates against the primary tier
//! - `storefront_http` - Storefront router tests, in process

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use otomono_core::OrderDraft;
use otomono_orders::{DocumentStoreConfig, RealtimeStoreConfig, RetryPolicy};

/// Retry policy with millisecond backoff so outage tests stay fast.
#[must_use]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        attempts: 3,
        base_delay: Duration::from_millis(2),
    }
}

/// A well-formed submission for the given customer.
#[must_use]
pub fn draft(name: &str) -> OrderDraft {
    OrderDraft {
        customer_name: name.to_string(),
        customer_email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        quantity: 2,
        material_preference: "polyester".to_string(),
        design: None,
    }
}

type Documents = Arc<Mutex<HashMap<String, Value>>>;

fn stored(docs: &Documents, key: &str) -> Option<Value> {
    docs.lock().expect("mock store lock").get(key).cloned()
}

// =============================================================================
// Mock document store
// =============================================================================

#[derive(Clone)]
struct DocBackendState {
    docs: Documents,
    healthy: Arc<AtomicBool>,
}

/// In-process stand-in for the hosted document store.
///
/// Serves `PUT/GET/PATCH /v1/{collection}/{id}` and collection listing on a
/// random local port. Flip [`MockDocumentBackend::set_healthy`] to simulate
/// an outage; every route then answers 503.
pub struct MockDocumentBackend {
    addr: SocketAddr,
    docs: Documents,
    healthy: Arc<AtomicBool>,
}

impl MockDocumentBackend {
    /// Bind a random local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let docs: Documents = Arc::new(Mutex::new(HashMap::new()));
        let healthy = Arc::new(AtomicBool::new(true));
        let state = DocBackendState {
            docs: Arc::clone(&docs),
            healthy: Arc::clone(&healthy),
        };

        let router = Router::new()
            .route("/v1/{collection}", get(doc_list))
            .route(
                "/v1/{collection}/{id}",
                get(doc_get).put(doc_put).patch(doc_patch),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock document backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            docs,
            healthy,
        }
    }

    /// Client configuration pointing at this mock.
    ///
    /// # Panics
    ///
    /// Panics if the local address does not form a valid URL.
    #[must_use]
    pub fn config(&self) -> DocumentStoreConfig {
        DocumentStoreConfig {
            base_url: Url::parse(&format!("http://{}/", self.addr)).expect("mock base url"),
            api_key: SecretString::from("integration-test-key"),
        }
    }

    /// Toggle between healthy and hard-down (503 on every route).
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// The stored document, if any.
    #[must_use]
    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        stored(&self.docs, &format!("{collection}/{id}"))
    }

    /// Number of documents held in one collection.
    #[must_use]
    pub fn collection_len(&self, collection: &str) -> usize {
        let prefix = format!("{collection}/");
        self.docs
            .lock()
            .expect("mock store lock")
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .count()
    }
}

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "backend down").into_response()
}

async fn doc_put(
    State(state): State<DocBackendState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    state
        .docs
        .lock()
        .expect("mock store lock")
        .insert(format!("{collection}/{id}"), body);
    StatusCode::OK.into_response()
}

async fn doc_get(
    State(state): State<DocBackendState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    match stored(&state.docs, &format!("{collection}/{id}")) {
        Some(doc) => Json(doc).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn doc_patch(
    State(state): State<DocBackendState>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    let mut docs = state.docs.lock().expect("mock store lock");
    let Some(doc) = docs.get_mut(&format!("{collection}/{id}")) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(fields)) = (doc.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    StatusCode::OK.into_response()
}

async fn doc_list(
    State(state): State<DocBackendState>,
    Path(collection): Path<String>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    let prefix = format!("{collection}/");
    let docs: Vec<Value> = state
        .docs
        .lock()
        .expect("mock store lock")
        .iter()
        .filter(|(k, _)| k.starts_with(&prefix))
        .map(|(_, v)| v.clone())
        .collect();
    Json(docs).into_response()
}

// =============================================================================
// Mock realtime store
// =============================================================================

#[derive(Clone)]
struct RealtimeBackendState {
    records: Documents,
    healthy: Arc<AtomicBool>,
}

/// In-process stand-in for the hosted realtime store.
///
/// Serves the `orders` path: records at `/orders/{id}.json`, listing at
/// `/orders.json`. Missing records and empty listings come back as the
/// literal `null` with status 200, matching the real backend.
pub struct MockRealtimeBackend {
    addr: SocketAddr,
    records: Documents,
    healthy: Arc<AtomicBool>,
}

impl MockRealtimeBackend {
    /// Bind a random local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let records: Documents = Arc::new(Mutex::new(HashMap::new()));
        let healthy = Arc::new(AtomicBool::new(true));
        let state = RealtimeBackendState {
            records: Arc::clone(&records),
            healthy: Arc::clone(&healthy),
        };

        let router = Router::new()
            .route("/orders.json", get(rt_list))
            .route(
                "/orders/{record}",
                get(rt_get).put(rt_put).patch(rt_patch),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock realtime backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            records,
            healthy,
        }
    }

    /// Client configuration pointing at this mock.
    ///
    /// # Panics
    ///
    /// Panics if the local address does not form a valid URL.
    #[must_use]
    pub fn config(&self) -> RealtimeStoreConfig {
        RealtimeStoreConfig {
            base_url: Url::parse(&format!("http://{}/", self.addr)).expect("mock base url"),
            auth_token: SecretString::from("integration-test-token"),
        }
    }

    /// Toggle between healthy and hard-down (503 on every route).
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// The stored record, if any.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<Value> {
        stored(&self.records, id)
    }
}

fn record_id(raw: &str) -> String {
    raw.strip_suffix(".json").unwrap_or(raw).to_string()
}

async fn rt_put(
    State(state): State<RealtimeBackendState>,
    Path(record): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    state
        .records
        .lock()
        .expect("mock store lock")
        .insert(record_id(&record), body);
    StatusCode::OK.into_response()
}

async fn rt_get(
    State(state): State<RealtimeBackendState>,
    Path(record): Path<String>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    Json(stored(&state.records, &record_id(&record))).into_response()
}

async fn rt_patch(
    State(state): State<RealtimeBackendState>,
    Path(record): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    let mut records = state.records.lock().expect("mock store lock");
    let Some(doc) = records.get_mut(&record_id(&record)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(fields)) = (doc.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    StatusCode::OK.into_response()
}

async fn rt_list(State(state): State<RealtimeBackendState>) -> Response {
    if !state.healthy.load(Ordering::SeqCst) {
        return unavailable();
    }
    let records = state.records.lock().expect("mock store lock");
    if records.is_empty() {
        return Json(Value::Null).into_response();
    }
    let map: HashMap<String, Value> =
        records.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    Json(map).into_response()
}
