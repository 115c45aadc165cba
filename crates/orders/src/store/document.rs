//! Primary tier: hosted document store over JSON REST.
//!
//! Documents live at `{base_url}/v1/{collection}/{id}`. The API key travels
//! in the `x-api-key` header; it never appears in URLs or logs.

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

/// Connection settings for the hosted document store.
#[derive(Clone)]
pub struct DocumentStoreConfig {
    /// Base URL of the document store API.
    pub base_url: Url,
    /// Project API key.
    pub api_key: SecretString,
}

impl std::fmt::Debug for DocumentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Client for the hosted document store (primary tier).
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    config: DocumentStoreConfig,
    collection: String,
}

impl DocumentStore {
    /// Create a client for one collection of the document store.
    #[must_use]
    pub fn new(config: DocumentStoreConfig, collection: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client: reqwest::Client::new(),
                config,
                collection: collection.into(),
            }),
        }
    }

    /// The collection this client reads and writes.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.inner.collection
    }

    fn collection_url(&self) -> String {
        format!(
            "{}v1/{}",
            self.inner.config.base_url, self.inner.collection
        )
    }

    fn doc_url(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_url())
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("x-api-key", self.inner.config.api_key.expose_secret())
    }

    /// Write an arbitrary JSON document under an explicit ID.
    ///
    /// Used by the analytics sink and design saves, which share the same
    /// backend but different collections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport failure or a non-success status.
    pub async fn put_document(
        &self,
        id: &str,
        document: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let response = self
            .authorized(self.inner.client.put(self.doc_url(id)))
            .json(document)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        debug!(collection = %self.inner.collection, id, "document written");
        Ok(())
    }
}

#[async_trait]
impl OrderStore for DocumentStore {
    fn tier(&self) -> StorageTier {
        StorageTier::DocumentStore
    }

    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let response = self
            .authorized(self.inner.client.put(self.doc_url(order.order_id.as_str())))
            .json(order)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        debug!(order_id = %order.order_id, "order written to document store");
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let response = self
            .authorized(self.inner.client.get(self.doc_url(id.as_str())))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        Ok(Some(response.json().await?))
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let response = self
            .authorized(self.inner.client.get(self.collection_url()))
            .query(&[("orderBy", "createdAt"), ("direction", "desc")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        let mut orders: Vec<Order> = response.json().await?;
        // Backends are not trusted to honor the ordering hint.
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let patch = json!({
            "status": status,
            "lastUpdated": updated_at,
        });
        let response = self
            .authorized(self.inner.client.patch(self.doc_url(id.as_str())))
            .json(&patch)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(StoreError::from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DocumentStore {
        let config = DocumentStoreConfig {
            base_url: Url::parse("https://docs.example.com/").expect("url"),
            api_key: SecretString::from("k3y"),
        };
        DocumentStore::new(config, "orders")
    }

    #[test]
    fn test_urls() {
        let store = store();
        assert_eq!(store.collection_url(), "https://docs.example.com/v1/orders");
        assert_eq!(
            store.doc_url("ORD-1-A"),
            "https://docs.example.com/v1/orders/ORD-1-A"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = DocumentStoreConfig {
            base_url: Url::parse("https://docs.example.com/").expect("url"),
            api_key: SecretString::from("super-secret-key"),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-key"));
    }
}
