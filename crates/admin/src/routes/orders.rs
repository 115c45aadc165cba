//! Order management routes.
//!
//! Listing, status transitions, and manual promotion of queued orders.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use otomono_core::{AdminRole, Order, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Order list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub admin: CurrentAdmin,
    pub orders: Vec<OrderRow>,
    /// Orders waiting in the local queue for promotion.
    pub queued: usize,
    pub current_path: &'static str,
}

/// One row in the order table, with the transitions the row's status allows.
pub struct OrderRow {
    pub order: Order,
    pub next_statuses: Vec<OrderStatus>,
}

impl OrderRow {
    fn new(order: Order) -> Self {
        let next_statuses = [
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .filter(|next| order.status.can_transition_to(*next))
        .collect();
        Self {
            order,
            next_statuses,
        }
    }
}

/// Display the order list.
///
/// GET /orders
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<OrdersTemplate> {
    let orders = state.orders().list().await?;
    let queued = state.orders().queue().len().await.unwrap_or(0);
    Ok(OrdersTemplate {
        admin,
        orders: orders.into_iter().map(OrderRow::new).collect(),
        queued,
        current_path: "/orders",
    })
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Update an order's lifecycle status.
///
/// POST /orders/{id}/status
#[instrument(skip(state, _admin, form), fields(order_id = %id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let id = OrderId::from_string(id);
    let next = form
        .status
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;

    let order = state
        .orders()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !order.status.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "cannot move a {} order to {next}",
            order.status
        )));
    }

    state.orders().update_status(&id, next).await?;
    Ok(Redirect::to("/orders"))
}

/// Promote queued orders to the document store.
///
/// POST /orders/sync
#[instrument(skip(state, admin))]
pub async fn sync_pending(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<Redirect> {
    if admin.role != AdminRole::Admin {
        return Err(AppError::Forbidden(
            "only admins can sync queued orders".to_string(),
        ));
    }
    let report = state.orders().sync_pending().await?;
    tracing::info!(
        synced = report.synced,
        failed = report.failed,
        by = %admin.email,
        "manual queue sync finished"
    );
    Ok(Redirect::to("/orders"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use otomono_core::{Money, OrderDraft};

    use super::*;

    fn order(status: OrderStatus) -> Order {
        let draft = OrderDraft {
            customer_name: "Jordan".to_string(),
            customer_email: "jordan@example.com".to_string(),
            quantity: 1,
            material_preference: "mesh".to_string(),
            design: None,
        };
        let mut order = Order::from_draft(draft, Money::from_dollars(25)).unwrap();
        order.status = status;
        order
    }

    #[test]
    fn test_pending_row_offers_processing_and_cancelled() {
        let row = OrderRow::new(order(OrderStatus::Pending));
        assert_eq!(
            row.next_statuses,
            vec![OrderStatus::Processing, OrderStatus::Cancelled]
        );
    }

    #[test]
    fn test_terminal_rows_offer_nothing() {
        assert!(OrderRow::new(order(OrderStatus::Completed))
            .next_statuses
            .is_empty());
        assert!(OrderRow::new(order(OrderStatus::Cancelled))
            .next_statuses
            .is_empty());
    }
}
