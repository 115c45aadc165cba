//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use otomono_core::DesignError;
use otomono_orders::OrderError;
use otomono_render::ExportError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order persistence failed even after every fallback tier.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A design parameter could not be parsed.
    #[error("Design error: {0}")]
    Design(#[from] DesignError),

    /// Rendering or encoding an export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; validation failures are the
        // client's problem and stay out of the error tracker.
        let is_client_error = matches!(
            &self,
            Self::Order(OrderError::Validation(_))
                | Self::Design(_)
                | Self::NotFound(_)
                | Self::BadRequest(_)
        );
        if !is_client_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Order(OrderError::Validation(_)) | Self::Design(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Order(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Export(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Order(OrderError::Validation(err)) => err.to_string(),
            Self::Order(_) => {
                "We could not save your order right now. Please try again.".to_string()
            }
            Self::Export(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use otomono_core::ValidationError;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::Order(OrderError::Validation(ValidationError::ZeroQuantity));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_exhausted_maps_to_bad_gateway() {
        let err = AppError::Order(OrderError::Exhausted {
            tier: otomono_core::StorageTier::LocalQueue,
            source: otomono_orders::StoreError::NotFound("x".to_string()),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_and_bad_request() {
        assert_eq!(
            status_of(AppError::NotFound("order".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("bad color".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
