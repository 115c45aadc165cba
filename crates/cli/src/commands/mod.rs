//! CLI command implementations.

pub mod export;
pub mod orders;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use otomono_core::{DesignError, Money};
use otomono_orders::{
    DocumentStore, DocumentStoreConfig, LocalQueue, OrderError, OrderService, OrderStore,
    RealtimeStore, RealtimeStoreConfig, StoreError,
};
use otomono_render::ExportError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Design error: {0}")]
    Design(#[from] DesignError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the order service from the same environment variables the web
/// crates use, wiring the full persistence cascade.
pub fn order_service_from_env() -> Result<OrderService, CliError> {
    let _ = dotenvy::dotenv();

    let document_store = DocumentStoreConfig {
        base_url: get_url("DOCSTORE_BASE_URL")?,
        api_key: SecretString::from(get_required("DOCSTORE_API_KEY")?),
    };

    let mut hosted: Vec<Arc<dyn OrderStore>> =
        vec![Arc::new(DocumentStore::new(document_store, "orders"))];

    // Secondary tier only when both variables are present.
    if let (Ok(base), Ok(token)) = (
        std::env::var("REALTIME_BASE_URL"),
        std::env::var("REALTIME_AUTH_TOKEN"),
    ) {
        let realtime = RealtimeStoreConfig {
            base_url: Url::parse(&base)
                .map_err(|e| CliError::InvalidEnvVar("REALTIME_BASE_URL", e.to_string()))?,
            auth_token: SecretString::from(token),
        };
        hosted.push(Arc::new(RealtimeStore::new(realtime, "orders")));
    }

    let queue_path = std::env::var("PENDING_QUEUE_PATH")
        .map_or_else(|_| PathBuf::from("data/pending-orders.json"), PathBuf::from);
    let queue = Arc::new(LocalQueue::new(queue_path));

    let unit_price = std::env::var("ORDER_UNIT_PRICE")
        .unwrap_or_else(|_| "25.00".to_string())
        .parse::<Decimal>()
        .map(Money::new)
        .map_err(|e| CliError::InvalidEnvVar("ORDER_UNIT_PRICE", e.to_string()))?;

    Ok(OrderService::new(hosted, queue, unit_price))
}

fn get_required(key: &'static str) -> Result<String, CliError> {
    std::env::var(key).map_err(|_| CliError::MissingEnvVar(key))
}

fn get_url(key: &'static str) -> Result<Url, CliError> {
    let value = get_required(key)?;
    Url::parse(&value).map_err(|e| CliError::InvalidEnvVar(key, e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_read_failure_maps_into_cli_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending-orders.json");
        std::fs::write(&path, b"not json").unwrap();

        let queue = LocalQueue::new(path);
        let err = queue.len().await.map_err(CliError::from).unwrap_err();
        assert!(matches!(err, CliError::Store(_)));
    }
}
