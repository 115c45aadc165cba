//! Admin dashboard.
//!
//! Shows order metrics, the new-order notification tray, and who is
//! logged in. Metrics are computed from whichever tier currently answers
//! the order listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::Redirect,
};
use chrono::Utc;
use tracing::instrument;

use otomono_core::{Money, Order, OrderStatus};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// How many recent orders the dashboard lists.
const RECENT_ORDERS: usize = 5;

/// Dashboard metrics computed from the order listing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub total_orders: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub revenue: Money,
}

impl Metrics {
    /// Compute metrics over a listing.
    #[must_use]
    pub fn compute(orders: &[Order]) -> Self {
        let mut metrics = Self {
            total_orders: orders.len(),
            ..Self::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => metrics.pending += 1,
                OrderStatus::Processing => metrics.processing += 1,
                OrderStatus::Completed => metrics.completed += 1,
                OrderStatus::Cancelled => {}
            }
        }
        // Cancelled orders do not count toward revenue.
        metrics.revenue = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total_amount)
            .sum();
        metrics
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: CurrentAdmin,
    pub metrics: Metrics,
    pub recent_orders: Vec<Order>,
    /// Pending orders surfaced as notifications; empty while suppressed.
    pub notifications: Vec<Order>,
    /// Hours since login, for the session indicator.
    pub session_age_hours: i64,
    /// Orders waiting in the local queue for promotion.
    pub queued: usize,
    pub current_path: &'static str,
}

/// Display the dashboard.
#[instrument(skip(state, admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<DashboardTemplate> {
    let now = Utc::now();
    let orders = state.orders().list().await?;
    let metrics = Metrics::compute(&orders);
    let queued = state.orders().queue().len().await.unwrap_or(0);

    let notifications = if state.prefs().notifications_suppressed(now).await? {
        Vec::new()
    } else {
        orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .take(RECENT_ORDERS)
            .cloned()
            .collect()
    };

    let recent_orders = orders.into_iter().take(RECENT_ORDERS).collect();
    let session_age_hours = admin.session_age(now).num_hours();

    Ok(DashboardTemplate {
        admin,
        metrics,
        recent_orders,
        notifications,
        session_age_hours,
        queued,
        current_path: "/",
    })
}

/// Clear the notification tray for the next 24 hours.
///
/// POST /notifications/clear
#[instrument(skip(state, _admin))]
pub async fn clear_notifications(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Redirect> {
    state.prefs().clear_notifications(Utc::now()).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use otomono_core::OrderDraft;

    use super::*;

    fn order(status: OrderStatus, quantity: u32) -> Order {
        let draft = OrderDraft {
            customer_name: "Jordan".to_string(),
            customer_email: "jordan@example.com".to_string(),
            quantity,
            material_preference: "mesh".to_string(),
            design: None,
        };
        let mut order = Order::from_draft(draft, Money::from_dollars(25)).unwrap();
        order.status = status;
        order
    }

    #[test]
    fn test_metrics_counts_by_status() {
        let orders = vec![
            order(OrderStatus::Pending, 1),
            order(OrderStatus::Pending, 2),
            order(OrderStatus::Processing, 1),
            order(OrderStatus::Completed, 3),
            order(OrderStatus::Cancelled, 4),
        ];
        let metrics = Metrics::compute(&orders);
        assert_eq!(metrics.total_orders, 5);
        assert_eq!(metrics.pending, 2);
        assert_eq!(metrics.processing, 1);
        assert_eq!(metrics.completed, 1);
        // 1 + 2 + 1 + 3 jerseys at $25; the cancelled 4 are excluded.
        assert_eq!(metrics.revenue, Money::from_dollars(175));
    }

    #[test]
    fn test_metrics_empty_listing() {
        let metrics = Metrics::compute(&[]);
        assert_eq!(metrics.total_orders, 0);
        assert_eq!(metrics.revenue, Money::zero());
    }
}
