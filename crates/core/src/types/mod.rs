//! Shared primitive types: IDs, emails, money, and status enums.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::OrderId;
pub use money::{Money, line_total};
pub use status::{AdminRole, OrderStatus, PaymentStatus, StorageTier};
