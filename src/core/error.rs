use std::time::Duration;
use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A key held a value of the wrong shape.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        /// Setting name (environment variable or TOML path).
        key: String,
        /// The rejected value.
        value: String,
        /// What was expected instead.
        reason: &'static str,
    },

    /// The TOML document could not be parsed.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A failed remote verification call.
///
/// The `Display` text is what callers see as `errorDescription`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS error and the like.
    #[error("network error: {0}")]
    Network(String),

    /// The call did not complete within the allotted time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The service reported a fault (e.g. member state unavailable).
    #[error("service fault: {0}")]
    Fault(String),

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Failure to assemble a checker or transport from configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SetupError {
    /// A required setting is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure to deliver a best-effort failure notice. Only ever logged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotifyError {
    /// The notification channel rejected or could not accept the notice.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_messages() {
        assert_eq!(
            TransportError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(10)).to_string(),
            "request timed out after 10s"
        );
        assert_eq!(
            TransportError::Api {
                status: 503,
                body: "unavailable".into()
            }
            .to_string(),
            "HTTP 503: unavailable"
        );
        assert_eq!(
            TransportError::Fault("MS_UNAVAILABLE".into()).to_string(),
            "service fault: MS_UNAVAILABLE"
        );
    }

    #[test]
    fn setup_error_is_transparent() {
        let err = SetupError::from(ConfigError::InvalidValue {
            key: "ch.url".into(),
            value: String::new(),
            reason: "required when the registry is enabled",
        });
        assert_eq!(
            err.to_string(),
            "invalid value for ch.url: \"\" (required when the registry is enabled)"
        );
        let err = SetupError::from(TransportError::Network("no TLS backend".into()));
        assert_eq!(err.to_string(), "network error: no TLS backend");
    }

    #[test]
    fn config_error_message() {
        let err = ConfigError::InvalidValue {
            key: "VAT_CHECKER_CACHE_TTL".into(),
            value: "soon".into(),
            reason: "expected a non-negative integer",
        };
        assert_eq!(
            err.to_string(),
            "invalid value for VAT_CHECKER_CACHE_TTL: \"soon\" (expected a non-negative integer)"
        );
    }
}
