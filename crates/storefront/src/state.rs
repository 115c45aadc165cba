//! Application state shared across handlers.

use std::sync::Arc;

use otomono_orders::{
    Analytics, DocumentStore, LocalQueue, OrderService, OrderStore, RealtimeStore,
};

use crate::config::StorefrontConfig;

/// Collection holding order documents in the document store.
pub const ORDERS_COLLECTION: &str = "orders";
/// Collection holding saved designs.
pub const DESIGNS_COLLECTION: &str = "jerseyDesigns";
/// Collection holding analytics events.
pub const ANALYTICS_COLLECTION: &str = "analytics";
/// Realtime store path for order records.
pub const ORDERS_PATH: &str = "orders";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the order service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    orders: OrderService,
    designs: DocumentStore,
    analytics: Analytics,
}

impl AppState {
    /// Create a new application state, wiring the persistence cascade from
    /// configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let mut hosted: Vec<Arc<dyn OrderStore>> = vec![Arc::new(DocumentStore::new(
            config.document_store.clone(),
            ORDERS_COLLECTION,
        ))];
        if let Some(realtime) = config.realtime_store.clone() {
            hosted.push(Arc::new(RealtimeStore::new(realtime, ORDERS_PATH)));
        }
        let queue = Arc::new(LocalQueue::new(config.pending_queue_path.clone()));
        let orders = OrderService::new(hosted, queue, config.unit_price);

        let designs = DocumentStore::new(config.document_store.clone(), DESIGNS_COLLECTION);
        let analytics = Analytics::new(DocumentStore::new(
            config.document_store.clone(),
            ANALYTICS_COLLECTION,
        ));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders,
                designs,
                analytics,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the order persistence service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the saved-designs collection client.
    #[must_use]
    pub fn designs(&self) -> &DocumentStore {
        &self.inner.designs
    }

    /// Get a reference to the analytics sink.
    #[must_use]
    pub fn analytics(&self) -> &Analytics {
        &self.inner.analytics
    }
}
