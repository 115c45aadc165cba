//! Order submission route handler.
//!
//! The order form posts here; the handler validates the draft, runs it
//! through the persistence cascade, and renders a confirmation page naming
//! the tier that accepted the order.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use otomono_core::{Order, OrderDraft, StorageTier};
use otomono_orders::AnalyticsEvent;

use crate::error::Result;
use crate::filters;
use crate::routes::designer::DesignParams;
use crate::state::AppState;

/// Order form data, with the design parameters flattened alongside the
/// customer fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: u32,
    pub material_preference: String,
    #[serde(flatten)]
    pub design: DesignParams,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "order_confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: Order,
    /// Customer-facing note about where the order landed.
    pub storage_note: &'static str,
}

/// Customer-facing wording for the tier that accepted the order.
const fn storage_note(tier: Option<StorageTier>) -> &'static str {
    match tier {
        Some(StorageTier::DocumentStore | StorageTier::RealtimeStore) | None => {
            "Your order has been received and is being processed."
        }
        Some(StorageTier::LocalQueue) => {
            "Your order has been saved and will be submitted as soon as our systems reconnect."
        }
    }
}

/// Submit an order.
///
/// POST /orders
#[instrument(skip(state, form), fields(email = %form.customer_email, quantity = form.quantity))]
pub async fn submit_order(
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> Result<ConfirmationTemplate> {
    let design = form.design.into_design()?;
    let draft = OrderDraft {
        customer_name: form.customer_name,
        customer_email: form.customer_email,
        quantity: form.quantity,
        material_preference: form.material_preference,
        design: Some(design),
    };

    let order = state.orders().save(draft).await?;

    state.analytics().track(
        AnalyticsEvent::new("order_placed").with_properties(serde_json::json!({
            "orderId": order.order_id,
            "quantity": order.quantity,
            "totalAmount": order.total_amount,
            "savedTo": order.saved_to,
        })),
    );
    tracing::info!(
        order_id = %order.order_id,
        saved_to = ?order.saved_to,
        "order submitted"
    );

    Ok(ConfirmationTemplate {
        storage_note: storage_note(order.saved_to),
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_note_for_hosted_tiers() {
        let note = storage_note(Some(StorageTier::DocumentStore));
        assert!(note.contains("being processed"));
        assert_eq!(note, storage_note(Some(StorageTier::RealtimeStore)));
    }

    #[test]
    fn test_storage_note_for_local_queue() {
        let note = storage_note(Some(StorageTier::LocalQueue));
        assert!(note.contains("as soon as our systems reconnect"));
    }
}
