//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health               - Health check
//!
//! # Auth
//! GET  /auth/login           - Login page
//! POST /auth/login           - Login action
//! POST /auth/logout          - Logout action
//!
//! # Dashboard (requires auth)
//! GET  /                     - Dashboard with metrics and notifications
//! POST /notifications/clear  - Clear the notification tray for 24 hours
//!
//! # Orders (requires auth)
//! GET  /orders               - Order list
//! POST /orders/{id}/status   - Update an order's lifecycle status
//! POST /orders/sync          - Promote queued orders (admin role only)
//! ```

pub mod auth;
pub mod dashboard;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/notifications/clear", post(dashboard::clear_notifications))
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/orders/sync", post(orders::sync_pending))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
}
