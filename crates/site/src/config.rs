//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `SQLite` connection string (e.g. `sqlite://soiree.db`)
//! - `SITE_BASE_URL` - Public URL for the site (used in emailed links)
//! - `ADMIN_PASSWORD` - Shared admin-panel password (placeholder/entropy checked)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `HOST_NAME` - Display name of the person hosting the event
//! - `EVENT_DATE_TEXT` - Human-readable event date line
//! - `DINNER_VENUE_NAME`, `DINNER_SCHEDULE`, `DINNER_MAPS_LINK` - Dinner venue
//! - `PARTY_VENUE_NAME`, `PARTY_SCHEDULE`, `PARTY_MAPS_LINK` - Party venue
//! - `MAILER_ENDPOINT` - Delivery endpoint for approval emails; notifications
//!   are skipped entirely when unset
//! - `MAILER_BUSINESS_NAME`, `MAILER_FROM_NAME`, `MAILER_FROM_EMAIL` - Sender
//!   identity for the delivery endpoint
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 16;
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

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `SQLite` connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Shared admin-panel password
    pub admin_password: SecretString,
    /// Display name of the person hosting the event
    pub host_name: String,
    /// Event details shown on pages and in emails
    pub event: EventConfig,
    /// Approval-email delivery configuration, if any
    pub mailer: Option<MailerConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Event details: date line plus the two venues.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Human-readable date of the event
    pub date_text: String,
    /// The dinner venue
    pub dinner: VenueConfig,
    /// The party venue
    pub party: VenueConfig,
}

/// A venue a guest can attend.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    /// Venue name
    pub name: String,
    /// Human-readable schedule line
    pub schedule: String,
    /// Optional maps link for the venue
    pub maps_link: Option<String>,
}

/// Delivery endpoint configuration for approval emails.
///
/// Implements `Debug` via derive; the endpoint holds no credential (any
/// auth is baked into the deployment-specific URL handler).
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// HTTP endpoint accepting the notification JSON payload
    pub endpoint: String,
    /// Name of the sending "business" shown by the delivery service
    pub business_name: String,
    /// From display name
    pub from_name: String,
    /// From email address
    pub from_email: String,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin password fails validation (placeholder detection,
    /// entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SITE_DATABASE_URL")?;
        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SITE_BASE_URL")?;
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string()))?;

        let admin_password = get_validated_secret("ADMIN_PASSWORD")?;
        validate_password_length(&admin_password, "ADMIN_PASSWORD")?;

        let host_name = get_env_or_default("HOST_NAME", "The Host");
        let event = EventConfig::from_env();
        let mailer = MailerConfig::from_env(&host_name);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_password,
            host_name,
            event,
            mailer,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Link to the personalized invitation for `email`, URL-encoded so the
    /// address round-trips through the path segment unchanged.
    #[must_use]
    pub fn invitation_url(&self, email: &str) -> String {
        format!("{}/inv/{}", self.base_url, urlencoding::encode(email))
    }
}

impl EventConfig {
    fn from_env() -> Self {
        Self {
            date_text: get_env_or_default("EVENT_DATE_TEXT", "Saturday, May 31"),
            dinner: VenueConfig {
                name: get_env_or_default("DINNER_VENUE_NAME", "The Supper Club"),
                schedule: get_env_or_default("DINNER_SCHEDULE", "Saturday, 9pm to 1am"),
                maps_link: get_optional_env("DINNER_MAPS_LINK"),
            },
            party: VenueConfig {
                name: get_env_or_default("PARTY_VENUE_NAME", "Club Midnight"),
                schedule: get_env_or_default("PARTY_SCHEDULE", "Sunday, 1am to 6am"),
                maps_link: get_optional_env("PARTY_MAPS_LINK"),
            },
        }
    }

    /// Venue details for one of the two events.
    #[must_use]
    pub const fn venue(&self, event: soiree_core::EventKind) -> &VenueConfig {
        match event {
            soiree_core::EventKind::Dinner => &self.dinner,
            soiree_core::EventKind::Party => &self.party,
        }
    }
}

impl MailerConfig {
    /// Present only when `MAILER_ENDPOINT` is set; approvals proceed without
    /// dispatching anything otherwise.
    fn from_env(host_name: &str) -> Option<Self> {
        let endpoint = get_optional_env("MAILER_ENDPOINT")?;

        Some(Self {
            endpoint,
            business_name: get_env_or_default("MAILER_BUSINESS_NAME", "Soiree"),
            from_name: get_env_or_default("MAILER_FROM_NAME", host_name),
            from_email: get_env_or_default("MAILER_FROM_EMAIL", "no-reply@localhost"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the admin password meets minimum length requirements.
fn validate_password_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_PASSWORD_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
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

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets have high entropy)
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

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-admin-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_rejects_the_obvious() {
        // The development default of the system this replaces
        assert!(validate_secret_strength("supersecretpassword", "TEST_VAR").is_err());
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_password_length_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_password_length(&secret, "TEST_PASSWORD").is_err());
    }

    #[test]
    fn test_validate_password_length_valid() {
        let secret = SecretString::from("a".repeat(MIN_PASSWORD_LENGTH));
        assert!(validate_password_length(&secret, "TEST_PASSWORD").is_ok());
    }

    fn test_config() -> SiteConfig {
        SiteConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://party.example.com".to_string(),
            admin_password: SecretString::from("x".repeat(32)),
            host_name: "Alex".to_string(),
            event: EventConfig {
                date_text: "Saturday, May 31".to_string(),
                dinner: VenueConfig {
                    name: "The Supper Club".to_string(),
                    schedule: "Saturday, 9pm to 1am".to_string(),
                    maps_link: None,
                },
                party: VenueConfig {
                    name: "Club Midnight".to_string(),
                    schedule: "Sunday, 1am to 6am".to_string(),
                    maps_link: None,
                },
            },
            mailer: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_invitation_url_encodes_email() {
        let config = test_config();
        assert_eq!(
            config.invitation_url("guest+rsvp@example.com"),
            "https://party.example.com/inv/guest%2Brsvp%40example.com"
        );
    }
}
