//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel (HTTPS enables secure cookies)
//! - `ADMIN_USERS` - Staff roster: comma-separated `email:password:name[:role]`
//! - `DOCSTORE_BASE_URL` - Base URL of the hosted document store API
//! - `DOCSTORE_API_KEY` - Document store API key (validated for strength)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `REALTIME_BASE_URL` - Base URL of the hosted realtime store
//! - `REALTIME_AUTH_TOKEN` - Realtime store auth token
//! - `ORDER_UNIT_PRICE` - Base jersey price in dollars (default: 25.00)
//! - `PENDING_QUEUE_PATH` - Local queue file (default: data/pending-orders.json)
//! - `ADMIN_PREFS_PATH` - Notification prefs file (default: data/admin-prefs.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The `role` in `ADMIN_USERS` is `admin` or `staff`, defaulting to `admin`.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use otomono_core::{AdminRole, Email, Money};
use otomono_orders::{DocumentStoreConfig, RealtimeStoreConfig};

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// One entry in the staff roster.
#[derive(Clone)]
pub struct AdminUser {
    pub email: Email,
    pub password: SecretString,
    pub name: String,
    pub role: AdminRole,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("email", &self.email.as_str())
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Staff roster for credential login
    pub admin_users: Vec<AdminUser>,
    /// Primary tier: hosted document store
    pub document_store: DocumentStoreConfig,
    /// Secondary tier: hosted realtime store, if configured
    pub realtime_store: Option<RealtimeStoreConfig>,
    /// Base jersey price per unit (for order totals shown in the panel)
    pub unit_price: Money,
    /// Local queue file shared with the storefront
    pub pending_queue_path: PathBuf,
    /// Notification preferences file
    pub prefs_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;

        let admin_users = parse_admin_users(&get_required_env("ADMIN_USERS")?)?;

        let document_store = DocumentStoreConfig {
            base_url: get_url("DOCSTORE_BASE_URL")?,
            api_key: get_validated_secret("DOCSTORE_API_KEY")?,
        };
        let realtime_store = realtime_store_from_env()?;

        let unit_price = get_env_or_default("ORDER_UNIT_PRICE", "25.00")
            .parse::<Decimal>()
            .map(Money::new)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORDER_UNIT_PRICE".to_string(), e.to_string())
            })?;
        let pending_queue_path = PathBuf::from(get_env_or_default(
            "PENDING_QUEUE_PATH",
            "data/pending-orders.json",
        ));
        let prefs_path = PathBuf::from(get_env_or_default(
            "ADMIN_PREFS_PATH",
            "data/admin-prefs.json",
        ));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            admin_users,
            document_store,
            realtime_store,
            unit_price,
            pending_queue_path,
            prefs_path,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Parse the `ADMIN_USERS` roster.
///
/// Format: comma-separated `email:password:name[:role]` entries. Passwords
/// must pass the same strength checks as API keys.
fn parse_admin_users(raw: &str) -> Result<Vec<AdminUser>, ConfigError> {
    let mut users = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_USERS".to_string(),
                "entries must be email:password:name[:role]".to_string(),
            ));
        }
        let email = Email::parse(parts[0]).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_USERS".to_string(), e.to_string())
        })?;
        validate_secret_strength(parts[1], "ADMIN_USERS")?;
        let role = match parts.get(3) {
            Some(raw_role) => raw_role.parse::<AdminRole>().map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_USERS".to_string(), e)
            })?,
            None => AdminRole::Admin,
        };
        users.push(AdminUser {
            email,
            password: SecretString::from(parts[1].to_string()),
            name: parts[2].to_string(),
            role,
        });
    }
    if users.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "ADMIN_USERS".to_string(),
            "at least one user is required".to_string(),
        ));
    }
    Ok(users)
}

/// Load the realtime store tier configuration, if both variables are set.
fn realtime_store_from_env() -> Result<Option<RealtimeStoreConfig>, ConfigError> {
    if get_optional_env("REALTIME_BASE_URL").is_none()
        && get_optional_env("REALTIME_AUTH_TOKEN").is_none()
    {
        return Ok(None);
    }
    Ok(Some(RealtimeStoreConfig {
        base_url: get_url("REALTIME_BASE_URL")?,
        auth_token: get_validated_secret("REALTIME_AUTH_TOKEN")?,
    }))
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_url(key: &str) -> Result<Url, ConfigError> {
    let value = get_required_env(key)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_PW: &str = "aB3$xY9!mK2@nL5#pQ7";

    #[test]
    fn test_parse_single_user_defaults_to_admin_role() {
        let users = parse_admin_users(&format!("ops@otomono.dev:{STRONG_PW}:Dana Ops")).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_str(), "ops@otomono.dev");
        assert_eq!(users[0].name, "Dana Ops");
        assert_eq!(users[0].role, AdminRole::Admin);
    }

    #[test]
    fn test_parse_multiple_users_with_roles() {
        let raw = format!(
            "ops@otomono.dev:{STRONG_PW}:Dana:admin, desk@otomono.dev:{STRONG_PW}:Eli:staff"
        );
        let users = parse_admin_users(&raw).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, AdminRole::Staff);
    }

    #[test]
    fn test_parse_rejects_malformed_entry() {
        assert!(parse_admin_users("ops@otomono.dev").is_err());
        assert!(parse_admin_users("").is_err());
        assert!(parse_admin_users("not-an-email:pw:Name").is_err());
    }

    #[test]
    fn test_parse_rejects_weak_password() {
        let result = parse_admin_users("ops@otomono.dev:aaaaaaaaaa:Dana");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let users = parse_admin_users(&format!("ops@otomono.dev:{STRONG_PW}:Dana")).unwrap();
        let debug = format!("{:?}", users[0]);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(STRONG_PW));
    }
}
