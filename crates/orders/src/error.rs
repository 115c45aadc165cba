//! Error types for storage tiers and the cascade.

use otomono_core::{StorageTier, ValidationError};
use thiserror::Error;

/// Errors from a single storage tier.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure talking to a hosted backend.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// Local queue file could not be read or written.
    #[error("queue i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The requested record does not exist in this tier.
    #[error("record not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Build a [`StoreError::Status`] from a reqwest response, consuming it.
    ///
    /// The body is truncated to keep log lines bounded.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        Self::Status { status, body }
    }
}

/// Errors from the order service.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The submission was malformed; rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Every tier in the cascade failed; carries the last tier's error.
    #[error("all storage tiers failed; last error from {tier}: {source}")]
    Exhausted {
        tier: StorageTier,
        #[source]
        source: StoreError,
    },

    /// A single-tier operation (status update, lookup) failed.
    #[error("{tier} operation failed: {source}")]
    Store {
        tier: StorageTier,
        #[source]
        source: StoreError,
    },
}
