//! Secondary tier: hosted realtime store.
//!
//! Records live at `{base_url}/{path}/{id}.json`. Auth rides in the
//! `auth` query parameter; listing the path returns a JSON object keyed by
//! record ID, or `null` when the path is empty.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use otomono_core::{Order, OrderId, OrderStatus, StorageTier};

use crate::error::StoreError;
use crate::store::{OrderStore, sort_newest_first};

/// Connection settings for the hosted realtime store.
#[derive(Clone)]
pub struct RealtimeStoreConfig {
    /// Base URL of the realtime database.
    pub base_url: Url,
    /// Database auth token.
    pub auth_token: SecretString,
}

impl std::fmt::Debug for RealtimeStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeStoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// Client for the hosted realtime store (secondary tier).
#[derive(Clone)]
pub struct RealtimeStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    config: RealtimeStoreConfig,
    path: String,
}

impl RealtimeStore {
    /// Create a client for one path of the realtime store.
    #[must_use]
    pub fn new(config: RealtimeStoreConfig, path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client: reqwest::Client::new(),
                config,
                path: path.into(),
            }),
        }
    }

    fn path_url(&self) -> String {
        format!("{}{}.json", self.inner.config.base_url, self.inner.path)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}{}/{id}.json", self.inner.config.base_url, self.inner.path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.query(&[("auth", self.inner.config.auth_token.expose_secret())])
    }
}

#[async_trait]
impl OrderStore for RealtimeStore {
    fn tier(&self) -> StorageTier {
        StorageTier::RealtimeStore
    }

    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let response = self
            .authorized(self.inner.client.put(self.record_url(order.order_id.as_str())))
            .json(order)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        debug!(order_id = %order.order_id, "order written to realtime store");
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let response = self
            .authorized(self.inner.client.get(self.record_url(id.as_str())))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        // A missing record comes back as the literal `null` with status 200.
        let order: Option<Order> = response.json().await?;
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let response = self
            .authorized(self.inner.client.get(self.path_url()))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        let records: Option<HashMap<String, Order>> = response.json().await?;
        let mut orders: Vec<Order> = records.unwrap_or_default().into_values().collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if self.get(id).await?.is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let patch = json!({
            "status": status,
            "lastUpdated": updated_at,
        });
        let response = self
            .authorized(self.inner.client.patch(self.record_url(id.as_str())))
            .json(&patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        Ok(())
    }
}
