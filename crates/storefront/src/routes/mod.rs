//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Jersey designer page
//! GET  /health           - Health check
//!
//! # Designer
//! GET  /preview.png      - Live cut-sheet preview for the current design
//! POST /designs          - Save a design to the document store
//!
//! # Export
//! GET  /export/png       - Download the design as a PNG
//! GET  /export/pdf       - Download the design as a single-page PDF
//!
//! # Orders
//! POST /orders           - Submit an order through the persistence cascade
//! ```

pub mod designer;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(designer::designer_page))
        .route("/preview.png", get(designer::preview_png))
        .route("/designs", post(designer::save_design))
        .route("/export/png", get(designer::export_png))
        .route("/export/pdf", get(designer::export_pdf))
        .route("/orders", post(orders::submit_order))
}
