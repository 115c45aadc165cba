//! Order identifier generation and parsing.
//!
//! Order IDs have the shape `ORD-<unix-millis>-<9 uppercase alphanumerics>`.
//! The generated ID is canonical across every storage tier: hosted backends
//! write documents under this ID rather than minting their own, so a record
//! promoted from the local queue to the primary store keeps its identity.

use core::fmt;

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Length of the random suffix appended to each order ID.
const SUFFIX_LEN: usize = 9;

/// A unique order identifier.
///
/// ```
/// use otomono_core::OrderId;
///
/// let id = OrderId::generate();
/// assert!(id.as_str().starts_with("ORD-"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh order ID from the current time and a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        Self(format!("ORD-{millis}-{suffix}"))
    }

    /// Wrap an existing identifier, e.g. one read back from a backend.
    #[must_use]
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let id = OrderId::generate();
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generate_unique() {
        // The timestamp alone may collide within a millisecond, the random
        // suffix keeps IDs distinct across repeated calls.
        let ids: Vec<OrderId> = (0..100).map(|_| OrderId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::from_string("ORD-1700000000000-AB12CD34E".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ORD-1700000000000-AB12CD34E\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
