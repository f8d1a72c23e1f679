//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SQUARE_ACCESS_TOKEN` - Square API access token
//! - `SQUARE_APPLICATION_ID` - Square application ID (public, used by the Web Payments SDK)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SITE_ORIGIN` - Origin allowed by CORS (default: <https://shopgrasshopper.com>)
//! - `STOREFRONT_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` for reviews (in-memory when unset)
//! - `SQUARE_BASE_URL` - Square API base (default: <https://connect.squareup.com/v2>)
//! - `SQUARE_API_VERSION` - `Square-Version` header (default: 2024-01-18)
//! - `SQUARE_DISCOUNT_API_VERSION` - `Square-Version` for promo lookups (default: 2024-11-20)
//! - `OWNER_EMAIL` - Where order notifications go
//! - `UPSTREAM_TIMEOUT_SECS` - Timeout for outbound HTTP calls (default: 15)
//! - `ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`, `ANTHROPIC_API_URL` - Hair analysis
//! - `GMAIL_CLIENT_ID`, `GMAIL_CLIENT_SECRET`, `GMAIL_REFRESH_TOKEN`, `GMAIL_FROM_EMAIL` - E-mail
//! - `GMAIL_TOKEN_URL`, `GMAIL_API_URL` - Google endpoints (defaults to production)
//! - `ADMIN_KEY` - Shared key for the admin export endpoint
//! - `NETLIFY_API_TOKEN`, `NETLIFY_SITE_ID`, `NETLIFY_API_URL` - Newsletter export
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//! - `LOG_FORMAT` - `json` for JSON log lines (default: human-readable)

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use grasshopper_core::Email;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_SITE_ORIGIN: &str = "https://shopgrasshopper.com";
const DEFAULT_OWNER_EMAIL: &str = "dyette@icloud.com";
const DEFAULT_SQUARE_BASE_URL: &str = "https://connect.squareup.com/v2";
const DEFAULT_SQUARE_API_VERSION: &str = "2024-01-18";
const DEFAULT_SQUARE_DISCOUNT_API_VERSION: &str = "2024-11-20";
const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5-20250929";
const DEFAULT_GMAIL_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_GMAIL_API_URL: &str = "https://gmail.googleapis.com/gmail/v1";
const DEFAULT_NETLIFY_API_URL: &str = "https://api.netlify.com/api/v1";

/// What a configured secret has to look like before the server will start.
#[derive(Debug, Clone, Copy)]
struct SecretRule {
    min_len: usize,
    /// Distinct characters required. Only set for keys people pick by hand.
    min_distinct: usize,
    /// Prefix the issuer puts on every key.
    prefix: Option<&'static str>,
    /// Where a real value comes from.
    hint: &'static str,
}

const ADMIN_KEY_RULE: SecretRule = SecretRule {
    min_len: 16,
    min_distinct: 8,
    prefix: None,
    hint: "generate one with `openssl rand -base64 24`",
};

const SQUARE_TOKEN_RULE: SecretRule = SecretRule {
    min_len: 20,
    min_distinct: 0,
    prefix: None,
    hint: "copy the access token from the Square Developer Dashboard",
};

const ANTHROPIC_KEY_RULE: SecretRule = SecretRule {
    min_len: 20,
    min_distinct: 0,
    prefix: Some("sk-ant-"),
    hint: "create a key in the Anthropic Console",
};

/// Characters found in doc samples such as `{ACCESS_TOKEN}`, `<api key>`
/// or `$ANTHROPIC_API_KEY`, never in issued keys.
const TEMPLATE_CHARS: &[char] = &['<', '>', '{', '}', '$'];

/// Lower-cased fragments of sample values from the Square and Anthropic
/// docs and from `.env.example`.
const TEMPLATE_FRAGMENTS: &[&str] = &[
    "your_",
    "your-",
    "access_token",
    "api_key",
    "admin_key",
    "changeme",
    "replace_me",
    "xxxx",
    "...",
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

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// The only origin allowed to call the API from a browser
    pub site_origin: String,
    /// `PostgreSQL` URL for the review store; `None` keeps reviews in memory
    pub database_url: Option<SecretString>,
    /// Square commerce API configuration
    pub square: SquareConfig,
    /// Recipient of new-order notifications
    pub owner_email: Email,
    /// Timeout applied to every outbound HTTP request
    pub http_timeout: Duration,
    /// Anthropic API configuration (hair analysis)
    pub anthropic: Option<AnthropicConfig>,
    /// Gmail API configuration (order e-mails)
    pub gmail: Option<GmailConfig>,
    /// Netlify API configuration (newsletter export)
    pub netlify: Option<NetlifyConfig>,
    /// Shared key guarding admin endpoints
    pub admin_key: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
    pub log_format: LogFormat,
}

/// Square API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct SquareConfig {
    /// Server-side access token
    pub access_token: SecretString,
    /// Application ID (safe to expose in browser)
    pub application_id: String,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Default `Square-Version` header
    pub api_version: String,
    /// `Square-Version` used for discount and pricing rule lookups
    pub discount_api_version: String,
}

impl std::fmt::Debug for SquareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquareConfig")
            .field("access_token", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("discount_api_version", &self.discount_api_version)
            .finish()
    }
}

/// Anthropic Messages API configuration.
#[derive(Clone)]
pub struct AnthropicConfig {
    pub api_key: SecretString,
    pub model: String,
    pub api_url: String,
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Gmail API configuration (OAuth2 refresh-token flow).
#[derive(Clone)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    /// Sender address; must belong to the authorized Google account
    pub from_email: Email,
    pub token_url: String,
    pub api_url: String,
}

impl std::fmt::Debug for GmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("from_email", &self.from_email)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Netlify API configuration.
#[derive(Clone)]
pub struct NetlifyConfig {
    pub api_token: SecretString,
    pub site_id: String,
    pub api_url: String,
}

impl std::fmt::Debug for NetlifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlifyConfig")
            .field("api_token", &"[REDACTED]")
            .field("site_id", &self.site_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if `ADMIN_KEY`, `SQUARE_ACCESS_TOKEN` or `ANTHROPIC_API_KEY` looks like
    /// a sample value rather than a real key.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let site_origin = parse_origin(
            "SITE_ORIGIN",
            &get_env_or_default("SITE_ORIGIN", DEFAULT_SITE_ORIGIN),
        )?;
        let database_url = get_database_url("STOREFRONT_DATABASE_URL");
        let owner_email = get_email("OWNER_EMAIL", &get_env_or_default("OWNER_EMAIL", DEFAULT_OWNER_EMAIL))?;
        let timeout_secs = get_env_or_default("UPSTREAM_TIMEOUT_SECS", "15")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UPSTREAM_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let admin_key = get_optional_env("ADMIN_KEY")
            .map(|key| checked_secret("ADMIN_KEY", key, &ADMIN_KEY_RULE))
            .transpose()?;

        Ok(Self {
            host,
            port,
            site_origin,
            database_url,
            square: SquareConfig::from_env()?,
            owner_email,
            http_timeout: Duration::from_secs(timeout_secs),
            anthropic: AnthropicConfig::from_env()?,
            gmail: GmailConfig::from_env()?,
            netlify: NetlifyConfig::from_env()?,
            admin_key,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
            log_format: match get_optional_env("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SquareConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_token: checked_secret(
                "SQUARE_ACCESS_TOKEN",
                get_required_env("SQUARE_ACCESS_TOKEN")?,
                &SQUARE_TOKEN_RULE,
            )?,
            application_id: get_required_env("SQUARE_APPLICATION_ID")?,
            base_url: get_base_url("SQUARE_BASE_URL", DEFAULT_SQUARE_BASE_URL)?,
            api_version: get_env_or_default("SQUARE_API_VERSION", DEFAULT_SQUARE_API_VERSION),
            discount_api_version: get_env_or_default(
                "SQUARE_DISCOUNT_API_VERSION",
                DEFAULT_SQUARE_DISCOUNT_API_VERSION,
            ),
        })
    }
}

impl AnthropicConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = get_optional_env("ANTHROPIC_API_KEY") else {
            return Ok(None);
        };
        Ok(Some(Self {
            api_key: checked_secret("ANTHROPIC_API_KEY", api_key, &ANTHROPIC_KEY_RULE)?,
            model: get_env_or_default("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            api_url: get_base_url("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_API_URL)?,
        }))
    }
}

impl GmailConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(client_id), Some(client_secret), Some(refresh_token), Some(from)) = (
            get_optional_env("GMAIL_CLIENT_ID"),
            get_optional_env("GMAIL_CLIENT_SECRET"),
            get_optional_env("GMAIL_REFRESH_TOKEN"),
            get_optional_env("GMAIL_FROM_EMAIL"),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
            refresh_token: SecretString::from(refresh_token),
            from_email: get_email("GMAIL_FROM_EMAIL", &from)?,
            token_url: get_base_url("GMAIL_TOKEN_URL", DEFAULT_GMAIL_TOKEN_URL)?,
            api_url: get_base_url("GMAIL_API_URL", DEFAULT_GMAIL_API_URL)?,
        }))
    }
}

impl NetlifyConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(api_token), Some(site_id)) = (
            get_optional_env("NETLIFY_API_TOKEN"),
            get_optional_env("NETLIFY_SITE_ID"),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            api_token: SecretString::from(api_token),
            site_id,
            api_url: get_base_url("NETLIFY_API_URL", DEFAULT_NETLIFY_API_URL)?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Read a URL-valued variable, validating it and stripping any trailing slash.
fn get_base_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let raw = get_env_or_default(key, default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(raw.trim_end_matches('/').to_string())
}

/// Normalize a site URL to its origin (`scheme://host[:port]`).
fn parse_origin(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an http(s) origin".to_string(),
        ));
    }
    Ok(origin.ascii_serialization())
}

fn get_email(key: &str, raw: &str) -> Result<Email, ConfigError> {
    Email::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be between 0.0 and 1.0".to_string(),
        ));
    }
    Ok(rate)
}

/// Wrap `value` once it passes `rule`.
///
/// Values that look copied from a template are refused first, then the
/// issuer prefix, length and character variety are checked.
fn checked_secret(var: &str, value: String, rule: &SecretRule) -> Result<SecretString, ConfigError> {
    if let Some(problem) = secret_problem(&value, rule) {
        return Err(ConfigError::InsecureSecret(
            var.to_string(),
            format!("{problem}; {}", rule.hint),
        ));
    }
    Ok(SecretString::from(value))
}

/// The first thing wrong with `value`, if any.
fn secret_problem(value: &str, rule: &SecretRule) -> Option<String> {
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || TEMPLATE_CHARS.contains(c))
    {
        return Some(format!("looks copied from a template (contains {c:?})"));
    }
    let lower = value.to_ascii_lowercase();
    if let Some(fragment) = TEMPLATE_FRAGMENTS.iter().find(|f| lower.contains(**f)) {
        return Some(format!("looks like a sample value (contains '{fragment}')"));
    }
    if let Some(prefix) = rule.prefix.filter(|p| !value.starts_with(p)) {
        return Some(format!("must start with '{prefix}'"));
    }
    let len = value.chars().count();
    if len < rule.min_len {
        return Some(format!("is {len} characters, need at least {}", rule.min_len));
    }
    let distinct = value.chars().collect::<HashSet<_>>().len();
    if distinct < rule.min_distinct {
        return Some(format!(
            "uses only {distinct} different characters, need {}",
            rule.min_distinct
        ));
    }
    None
}

/// Expose a secret for an outbound `Authorization` header.
pub(crate) fn bearer(secret: &SecretString) -> String {
    format!("Bearer {}", secret.expose_secret())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// A configuration pointing every integration at `base` (a mock server).
    pub(crate) fn test_config(base: &str) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            site_origin: "https://shopgrasshopper.com".to_string(),
            database_url: None,
            square: SquareConfig {
                access_token: SecretString::from("sq-test-token"),
                application_id: "sq0idp-test".to_string(),
                base_url: format!("{base}/v2"),
                api_version: DEFAULT_SQUARE_API_VERSION.to_string(),
                discount_api_version: DEFAULT_SQUARE_DISCOUNT_API_VERSION.to_string(),
            },
            owner_email: Email::parse("owner@shopgrasshopper.com").unwrap(),
            http_timeout: Duration::from_secs(5),
            anthropic: Some(AnthropicConfig {
                api_key: SecretString::from("sk-ant-test"),
                model: DEFAULT_ANTHROPIC_MODEL.to_string(),
                api_url: format!("{base}/v1/messages"),
            }),
            gmail: None,
            netlify: Some(NetlifyConfig {
                api_token: SecretString::from("nf-test"),
                site_id: "site-123".to_string(),
                api_url: format!("{base}/api/v1"),
            }),
            admin_key: Some(SecretString::from("k3Y-9fQ2-zX7w-Lm4P")),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            log_format: LogFormat::Pretty,
        }
    }

    #[test]
    fn test_admin_key_rule() {
        let problem = |key: &str| secret_problem(key, &ADMIN_KEY_RULE);
        assert_eq!(problem("k3Y-9fQ2-zX7w-Lm4P"), None);
        assert_eq!(
            problem("k3Y-9fQ2").as_deref(),
            Some("is 8 characters, need at least 16")
        );
        assert_eq!(
            problem("aaaaaaaaaaaaaaaaaaaa").as_deref(),
            Some("uses only 1 different characters, need 8")
        );
        assert_eq!(
            problem("your-admin-key-here-123").as_deref(),
            Some("looks like a sample value (contains 'your-')")
        );
        assert_eq!(
            problem("k3Y 9fQ2 zX7w Lm4P").as_deref(),
            Some("looks copied from a template (contains ' ')")
        );
    }

    #[test]
    fn test_square_token_rule() {
        let problem = |token: &str| secret_problem(token, &SQUARE_TOKEN_RULE);
        assert_eq!(problem("EAAAl7Qm2vXk9PzR4tYw8nHc3JfB6sLd"), None);
        assert_eq!(
            problem("{ACCESS_TOKEN}").as_deref(),
            Some("looks copied from a template (contains '{')")
        );
        assert_eq!(
            problem("YOUR_SQUARE_ACCESS_TOKEN").as_deref(),
            Some("looks like a sample value (contains 'your_')")
        );
        assert_eq!(
            problem("EAAAl7Qm2v").as_deref(),
            Some("is 10 characters, need at least 20")
        );
    }

    #[test]
    fn test_anthropic_key_rule() {
        let problem = |key: &str| secret_problem(key, &ANTHROPIC_KEY_RULE);
        assert_eq!(problem("sk-ant-REDACTED"), None);
        assert_eq!(
            problem("sk-ant-api03-...").as_deref(),
            Some("looks like a sample value (contains '...')")
        );
        assert_eq!(
            problem("$ANTHROPIC_API_KEY").as_deref(),
            Some("looks copied from a template (contains '$')")
        );
        assert_eq!(
            problem("sk-proj-Zq8xW2mK4vN7pR1tYs5").as_deref(),
            Some("must start with 'sk-ant-'")
        );
    }

    #[test]
    fn test_checked_secret_names_variable_and_hint() {
        let err = checked_secret("ADMIN_KEY", "changeme".to_string(), &ADMIN_KEY_RULE)
            .unwrap_err()
            .to_string();
        assert_eq!(
            err,
            "Insecure secret in ADMIN_KEY: looks like a sample value (contains 'changeme'); \
             generate one with `openssl rand -base64 24`"
        );
        let key = checked_secret("ADMIN_KEY", "k3Y-9fQ2-zX7w-Lm4P".to_string(), &ADMIN_KEY_RULE)
            .unwrap();
        assert_eq!(key.expose_secret(), "k3Y-9fQ2-zX7w-Lm4P");
    }

    #[test]
    fn test_parse_origin() {
        assert_eq!(
            parse_origin("SITE_ORIGIN", "https://shopgrasshopper.com/").unwrap(),
            "https://shopgrasshopper.com"
        );
        assert_eq!(
            parse_origin("SITE_ORIGIN", "http://localhost:8888/shop").unwrap(),
            "http://localhost:8888"
        );
        assert!(parse_origin("SITE_ORIGIN", "not a url").is_err());
    }

    #[test]
    fn test_get_rate_bounds() {
        assert!((get_rate("GRASSHOPPER_TEST_UNSET_RATE", 0.5).unwrap() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config("http://127.0.0.1:9");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = test_config("http://127.0.0.1:9");
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("sq0idp-test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sq-test-token"));
        assert!(!debug_output.contains("sk-ant-test"));
        assert!(!debug_output.contains("nf-test"));
    }
}
