//! Checker configuration.
//!
//! Configuration is a plain value handed to the checker at construction.
//! It can be built in code, parsed from TOML, or read from `VAT_CHECKER_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Official VIES REST endpoint.
pub const VIES_REST_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Default notification subject.
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "VAT Checker: VIES connection error";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Cache policy for successful lookups.
    pub cache: CacheConfig,
    /// Failure notification policy.
    pub notifications: NotificationConfig,
    /// VIES transport settings.
    pub vies: ViesConfig,
    /// Optional external registry for Switzerland.
    pub ch: ExternalRegistryConfig,
}

/// Cache policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Write successes to the cache and fall back to it on failure.
    pub enabled: bool,
    /// Entry lifetime in seconds; `0` keeps entries forever.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 86_400,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime, or `None` for entries that never expire.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_seconds > 0).then(|| Duration::from_secs(self.ttl_seconds))
    }
}

/// Failure notification policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Send a notice when a remote lookup fails.
    pub enabled: bool,
    /// Who receives the notice.
    pub recipients: Vec<String>,
    /// Subject line of the notice.
    pub subject: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            recipients: Vec::new(),
            subject: DEFAULT_NOTIFICATION_SUBJECT.into(),
        }
    }
}

impl NotificationConfig {
    /// Enabled and has somewhere to send to.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.recipients.is_empty()
    }
}

/// VIES transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViesConfig {
    /// Endpoint of the VIES `check-vat-number` operation.
    pub url: String,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Optional hard deadline around the whole lookup, in seconds.
    pub deadline_seconds: Option<u64>,
}

impl Default for ViesConfig {
    fn default() -> Self {
        Self {
            url: VIES_REST_URL.into(),
            timeout_seconds: 10,
            deadline_seconds: None,
        }
    }
}

impl ViesConfig {
    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Hard deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds.map(Duration::from_secs)
    }
}

/// Settings for a JSON registry endpoint (used for Switzerland).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalRegistryConfig {
    /// Route external validation through the registry.
    pub enabled: bool,
    /// Endpoint URL; must answer with JSON.
    pub url: String,
    /// Optional API key sent with each request.
    pub api_key: Option<String>,
    /// Header carrying the API key.
    pub api_key_header: String,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ExternalRegistryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            api_key: None,
            api_key_header: "Authorization".into(),
            timeout_seconds: 10,
        }
    }
}

impl ExternalRegistryConfig {
    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl CheckerConfig {
    /// Parse a TOML document. Missing sections take their defaults.
    ///
    /// ```toml
    /// [cache]
    /// enabled = true
    /// ttl_seconds = 0
    ///
    /// [notifications]
    /// enabled = true
    /// recipients = ["ops@example.com"]
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read `VAT_CHECKER_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read `VAT_CHECKER_*` settings through `lookup`. Unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("VAT_CHECKER_CACHE") {
            config.cache.enabled = parse_bool("VAT_CHECKER_CACHE", &v)?;
        }
        if let Some(v) = lookup("VAT_CHECKER_CACHE_TTL") {
            config.cache.ttl_seconds = parse_u64("VAT_CHECKER_CACHE_TTL", &v)?;
        }
        if let Some(v) = lookup("VAT_CHECKER_NOTIFICATIONS") {
            config.notifications.enabled = parse_bool("VAT_CHECKER_NOTIFICATIONS", &v)?;
        }
        if let Some(v) = lookup("VAT_CHECKER_NOTIFICATIONS_MAIL_TO") {
            config.notifications.recipients = v
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup("VAT_CHECKER_NOTIFICATIONS_MAIL_SUBJECT") {
            config.notifications.subject = v;
        }
        if let Some(v) = lookup("VAT_CHECKER_VIES_TIMEOUT") {
            config.vies.timeout_seconds = parse_u64("VAT_CHECKER_VIES_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("VAT_CHECKER_CH_EXTERNAL") {
            config.ch.enabled = parse_bool("VAT_CHECKER_CH_EXTERNAL", &v)?;
        }
        if let Some(v) = lookup("VAT_CHECKER_CH_EXTERNAL_URL") {
            config.ch.url = v;
        }
        if let Some(v) = lookup("VAT_CHECKER_CH_EXTERNAL_API_KEY") {
            config.ch.api_key = (!v.is_empty()).then_some(v);
        }
        if let Some(v) = lookup("VAT_CHECKER_CH_EXTERNAL_API_KEY_HEADER") {
            config.ch.api_key_header = v;
        }
        if let Some(v) = lookup("VAT_CHECKER_CH_EXTERNAL_TIMEOUT") {
            config.ch.timeout_seconds = parse_u64("VAT_CHECKER_CH_EXTERNAL_TIMEOUT", &v)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: "expected a boolean",
        }),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: "expected a non-negative integer",
        })
}
