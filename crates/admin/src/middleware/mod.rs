//! Middleware for the admin panel.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, set_current_admin};
pub use session::create_session_layer;
