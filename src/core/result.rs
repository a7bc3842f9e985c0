use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identifier::Identifier;

/// `errorDescription` reported when no validator handles the prefix.
pub const UNSUPPORTED_COUNTRY: &str = "Country not supported";

/// Normalized answer from an external verification (or the lack of one).
///
/// On the wire this is a flat mapping: `valid`, `isError`,
/// `errorDescription`, plus whatever registry fields `details` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    /// Whether the registry confirmed the identifier.
    pub valid: bool,
    /// Whether the lookup itself failed.
    #[serde(default)]
    pub is_error: bool,
    /// Failure message when `is_error` is set.
    #[serde(default)]
    pub error_description: Option<String>,
    /// Substantive registry data (name, address, request date, ...).
    #[serde(flatten)]
    pub details: Map<String, Value>,
    /// Cache write time when this payload is a stale fallback.
    #[serde(skip)]
    pub cached_at: Option<DateTime<Utc>>,
}

impl VerificationPayload {
    /// Payload for jurisdictions without a live registry lookup.
    ///
    /// `valid` is false but `is_error` is false too: "not verifiable"
    /// rather than "verified invalid".
    pub fn not_verified(identifier: &Identifier) -> Self {
        let mut details = Map::new();
        details.insert(
            "countryCode".into(),
            Value::String(identifier.country_code.clone()),
        );
        details.insert(
            "nationalNumber".into(),
            Value::String(identifier.national_number.clone()),
        );
        Self {
            valid: false,
            is_error: false,
            error_description: None,
            details,
            cached_at: None,
        }
    }

    /// Explicit failure payload with no details.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            is_error: true,
            error_description: Some(message.into()),
            details: Map::new(),
            cached_at: None,
        }
    }

    /// Successful lookup carrying the registry's details.
    pub fn verified(valid: bool, details: Map<String, Value>) -> Self {
        Self {
            valid,
            is_error: false,
            error_description: None,
            details,
            cached_at: None,
        }
    }

    /// Flatten into the mapping stored in a cache.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.details.clone();
        map.insert("valid".into(), Value::Bool(self.valid));
        map.insert("isError".into(), Value::Bool(self.is_error));
        map.insert(
            "errorDescription".into(),
            self.error_description
                .clone()
                .map_or(Value::Null, Value::String),
        );
        map
    }

    /// Rebuild from a cached mapping. Missing flags default to false.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let valid = map
            .remove("valid")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let is_error = map
            .remove("isError")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let error_description = map
            .remove("errorDescription")
            .and_then(|v| v.as_str().map(str::to_string));
        Self {
            valid,
            is_error,
            error_description,
            details: map,
            cached_at: None,
        }
    }
}

/// Terminal state of one validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    /// No validator handles the prefix.
    Unsupported,
    /// Grammar or checksum rejected the national number.
    MalformedFormat,
    /// Well-formed and confirmed by the registry (possibly from a stale cache).
    ValidExternal,
    /// Well-formed, but the registry did not confirm it.
    InvalidExternal,
    /// Well-formed, but the lookup failed with nothing to fall back on.
    ExternalError,
}

/// The stable output shape of a validation call.
///
/// Invariant: `is_formatted == false` implies `is_valid == false` and an
/// empty `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the identifier passed its country's grammar and checksum.
    pub is_formatted: bool,
    /// Whether the registry confirmed the identifier.
    pub is_valid: bool,
    /// Whether an error occurred (unsupported country or failed lookup).
    pub is_error: bool,
    /// Human-readable error, if any.
    pub error_description: Option<String>,
    /// Registry data, only populated when `is_valid` is true.
    pub details: Map<String, Value>,
    /// When the reused answer was cached, set only on a stale fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

impl ValidationResult {
    /// Result for a prefix no validator supports.
    pub fn unsupported() -> Self {
        Self {
            is_formatted: false,
            is_valid: false,
            is_error: true,
            error_description: Some(UNSUPPORTED_COUNTRY.into()),
            details: Map::new(),
            cached_at: None,
        }
    }

    /// Result for a number that failed grammar or checksum.
    ///
    /// A format failure is a normal negative answer, not an error.
    pub fn malformed() -> Self {
        Self {
            is_formatted: false,
            is_valid: false,
            is_error: false,
            error_description: None,
            details: Map::new(),
            cached_at: None,
        }
    }

    /// Merge an external verification payload for a well-formed number.
    pub fn from_external(payload: VerificationPayload) -> Self {
        let details = if payload.valid {
            payload.details
        } else {
            Map::new()
        };
        Self {
            is_formatted: true,
            is_valid: payload.valid,
            is_error: payload.is_error,
            error_description: payload.error_description,
            details,
            cached_at: payload.cached_at,
        }
    }

    /// Which terminal state produced this result.
    pub fn state(&self) -> CheckState {
        match (self.is_formatted, self.is_valid, self.is_error) {
            (false, _, true) => CheckState::Unsupported,
            (false, _, false) => CheckState::MalformedFormat,
            (true, true, _) => CheckState::ValidExternal,
            (true, false, true) => CheckState::ExternalError,
            (true, false, false) => CheckState::InvalidExternal,
        }
    }

    /// True when a previously cached verdict was reused after a failed lookup.
    pub fn is_stale(&self) -> bool {
        self.cached_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsupported_shape() {
        let r = ValidationResult::unsupported();
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({
                "isFormatted": false,
                "isValid": false,
                "isError": true,
                "errorDescription": "Country not supported",
                "details": {}
            })
        );
        assert_eq!(r.state(), CheckState::Unsupported);
    }

    #[test]
    fn malformed_is_not_an_error() {
        let r = ValidationResult::malformed();
        assert!(!r.is_error);
        assert!(r.error_description.is_none());
        assert_eq!(r.state(), CheckState::MalformedFormat);
    }

    #[test]
    fn external_invalid_drops_details() {
        let mut details = Map::new();
        details.insert("name".into(), json!("ACME"));
        let r = ValidationResult::from_external(VerificationPayload::verified(false, details));
        assert!(r.is_formatted);
        assert!(r.details.is_empty());
        assert_eq!(r.state(), CheckState::InvalidExternal);
    }

    #[test]
    fn external_valid_keeps_details() {
        let mut details = Map::new();
        details.insert("name".into(), json!("Acme"));
        let r = ValidationResult::from_external(VerificationPayload::verified(true, details));
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({
                "isFormatted": true,
                "isValid": true,
                "isError": false,
                "errorDescription": null,
                "details": {"name": "Acme"}
            })
        );
        assert_eq!(r.state(), CheckState::ValidExternal);
    }

    #[test]
    fn external_failure_state() {
        let r = ValidationResult::from_external(VerificationPayload::failure("timeout"));
        assert_eq!(r.state(), CheckState::ExternalError);
        assert_eq!(r.error_description.as_deref(), Some("timeout"));
        assert!(!r.is_stale());
    }

    #[test]
    fn stale_result_serializes_cached_at() {
        let mut payload = VerificationPayload::verified(true, Map::new());
        payload.is_error = true;
        payload.cached_at = Some(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let r = ValidationResult::from_external(payload);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["cachedAt"], json!("2023-11-14T22:13:20Z"));
        assert!(r.is_stale());
    }

    #[test]
    fn not_verified_payload() {
        let p = VerificationPayload::not_verified(&Identifier::parse("NO923609016"));
        assert!(!p.valid);
        assert!(!p.is_error);
        assert_eq!(p.details["countryCode"], json!("NO"));
        assert_eq!(p.details["nationalNumber"], json!("923609016"));
    }

    #[test]
    fn map_conversion_preserves_fields() {
        let mut details = Map::new();
        details.insert("name".into(), json!("ACME GMBH"));
        details.insert("requestDate".into(), json!("2024-01-15"));
        let payload = VerificationPayload::verified(true, details);
        let map = payload.to_map();
        assert_eq!(map["valid"], json!(true));
        assert_eq!(map["isError"], json!(false));
        assert_eq!(map["errorDescription"], Value::Null);
        assert_eq!(VerificationPayload::from_map(map), payload);
    }

    #[test]
    fn payload_deserializes_flat_json() {
        let p: VerificationPayload =
            serde_json::from_value(json!({"valid": true, "name": "Acme"})).unwrap();
        assert!(p.valid);
        assert!(!p.is_error);
        assert_eq!(p.details.len(), 1);
        assert_eq!(p.details["name"], json!("Acme"));
    }
}
