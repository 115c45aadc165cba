//! Admin credential authentication.
//!
//! Checks login attempts against the configured staff roster. Comparison
//! is constant-time over the password bytes so timing does not leak which
//! part of a guess was wrong.

use secrecy::ExposeSecret;

use crate::config::AdminUser;
use crate::models::CurrentAdmin;

/// Credential checker over the configured staff roster.
pub struct CredentialGate<'a> {
    users: &'a [AdminUser],
}

impl<'a> CredentialGate<'a> {
    /// Create a gate over the roster.
    #[must_use]
    pub const fn new(users: &'a [AdminUser]) -> Self {
        Self { users }
    }

    /// Verify a login attempt. Returns the session identity on success.
    ///
    /// The email is matched case-insensitively; the password byte-exact.
    #[must_use]
    pub fn verify(&self, email: &str, password: &str) -> Option<CurrentAdmin> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .iter()
            .find(|u| u.email.as_str().eq_ignore_ascii_case(&email))?;
        if !constant_time_eq(user.password.expose_secret().as_bytes(), password.as_bytes()) {
            return None;
        }
        Some(CurrentAdmin {
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            login_time: chrono::Utc::now(),
        })
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
