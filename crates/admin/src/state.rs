//! Application state shared across handlers.

use std::sync::Arc;

use otomono_orders::{DocumentStore, LocalQueue, OrderService, OrderStore, RealtimeStore};

use crate::config::AdminConfig;
use crate::prefs::AdminPrefs;

/// Collection holding order documents in the document store.
pub const ORDERS_COLLECTION: &str = "orders";
/// Realtime store path for order records.
pub const ORDERS_PATH: &str = "orders";

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    orders: OrderService,
    prefs: AdminPrefs,
}

impl AppState {
    /// Create a new application state, wiring the same persistence cascade
    /// the storefront writes through.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let mut hosted: Vec<Arc<dyn OrderStore>> = vec![Arc::new(DocumentStore::new(
            config.document_store.clone(),
            ORDERS_COLLECTION,
        ))];
        if let Some(realtime) = config.realtime_store.clone() {
            hosted.push(Arc::new(RealtimeStore::new(realtime, ORDERS_PATH)));
        }
        let queue = Arc::new(LocalQueue::new(config.pending_queue_path.clone()));
        let orders = OrderService::new(hosted, queue, config.unit_price);
        let prefs = AdminPrefs::new(config.prefs_path.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders,
                prefs,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the notification preferences.
    #[must_use]
    pub fn prefs(&self) -> &AdminPrefs {
        &self.inner.prefs
    }
}
