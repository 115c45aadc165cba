//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use otomono_core::{AdminRole, Email};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
/// `login_time` anchors the 24-hour session window checked on every
/// authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
    /// When this session was established.
    pub login_time: DateTime<Utc>,
}

impl CurrentAdmin {
    /// Age of this session.
    #[must_use]
    pub fn session_age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.login_time
    }

    /// Whether this admin holds the full admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == AdminRole::Admin
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
