//! Fire-and-forget event tracking.
//!
//! Events are written to a separate collection of the document store on a
//! detached task. Delivery is best effort: failures are logged at debug
//! level and never surface to the caller or delay a response.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::store::DocumentStore;

/// A single tracked event, keyed by a random UUID.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
}

impl AnalyticsEvent {
    /// New event with the current timestamp and no properties.
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: event.into(),
            timestamp: Utc::now(),
            properties: serde_json::Value::Null,
        }
    }

    /// Attach a JSON payload of event properties.
    #[must_use]
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = properties;
        self
    }
}

/// Best-effort event sink backed by a document store collection.
#[derive(Clone)]
pub struct Analytics {
    store: DocumentStore,
}

impl Analytics {
    /// Wrap a document store client pointed at the analytics collection.
    #[must_use]
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Record an event without waiting for the write.
    ///
    /// The write happens on a spawned task; the caller returns immediately
    /// and a failed delivery only produces a debug log line.
    pub fn track(&self, event: AnalyticsEvent) {
        let store = self.store.clone();
        tokio::spawn(async move {
            let id = event.id.to_string();
            let document = match serde_json::to_value(&event) {
                Ok(document) => document,
                Err(err) => {
                    debug!(event = %event.event, error = %err, "analytics event not serializable");
                    return;
                }
            };
            if let Err(err) = store.put_document(&id, &document).await {
                debug!(event = %event.event, error = %err, "analytics event dropped");
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = AnalyticsEvent::new("order_placed")
            .with_properties(serde_json::json!({ "quantity": 3 }));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "order_placed");
        assert_eq!(json["properties"]["quantity"], 3);
        assert!(json.get("id").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_null_properties_omitted() {
        let event = AnalyticsEvent::new("page_view");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("properties").is_none());
    }

    #[test]
    fn test_event_ids_unique() {
        let a = AnalyticsEvent::new("x");
        let b = AnalyticsEvent::new("x");
        assert_ne!(a.id, b.id);
    }
}
