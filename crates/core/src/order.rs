//! The order record, submission draft, and validation.
//!
//! Field names on the wire are camelCase to match the backend collections
//! (`customerName`, `totalAmount`, `savedTo`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::design::JerseyDesign;
use crate::types::{
    Email, EmailError, Money, OrderId, OrderStatus, PaymentStatus, StorageTier, line_total,
};

/// Errors rejected before any backend write is attempted.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// A raw order submission, as it arrives from the order form.
///
/// Nothing here is trusted; [`OrderDraft::validate`] turns it into the
/// checked inputs an [`Order`] is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: u32,
    pub material_preference: String,
    /// Optional design snapshot attached to the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<JerseyDesign>,
}

impl OrderDraft {
    /// Required-field and shape validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming every missing field, or the first
    /// malformed one. No partial writes happen on failure; callers must not
    /// touch any storage tier before this passes.
    pub fn validate(&self) -> Result<Email, ValidationError> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customerName");
        }
        if self.customer_email.trim().is_empty() {
            missing.push("customerEmail");
        }
        if self.material_preference.trim().is_empty() {
            missing.push("materialPreference");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if self.quantity < 1 {
            return Err(ValidationError::ZeroQuantity);
        }
        let email = Email::parse(&self.customer_email)?;
        Ok(email)
    }
}

/// A fully stamped order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_email: Email,
    pub quantity: u32,
    pub material_preference: String,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastUpdated")]
    pub updated_at: DateTime<Utc>,
    /// Which tier accepted the record. `None` until first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<StorageTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<JerseyDesign>,
}

impl Order {
    /// Validate a draft and stamp it with id, timestamps, and computed total.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the draft is incomplete or malformed.
    pub fn from_draft(draft: OrderDraft, unit_price: Money) -> Result<Self, ValidationError> {
        let email = draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            order_id: OrderId::generate(),
            customer_name: draft.customer_name.trim().to_owned(),
            customer_email: email,
            quantity: draft.quantity,
            material_preference: draft.material_preference.trim().to_owned(),
            total_amount: line_total(unit_price, draft.quantity),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            saved_to: None,
            design: draft.design,
        })
    }

    /// Copy of this order tagged with the tier that accepted it.
    #[must_use]
    pub fn saved_to(&self, tier: StorageTier) -> Self {
        let mut order = self.clone();
        order.saved_to = Some(tier);
        order
    }
}
