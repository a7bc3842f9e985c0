use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{TransportError, VerificationPayload};

/// What a registry reports about one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecord {
    /// Whether the identifier is currently registered.
    pub valid: bool,
    /// Registered name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registered address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Date the registry answered (YYYY-MM-DD or an ISO timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
}

impl RemoteRecord {
    /// Payload for a successful lookup: error flags cleared, the present
    /// fields carried as details.
    pub fn into_payload(self) -> VerificationPayload {
        let mut details = Map::new();
        if let Some(name) = self.name {
            details.insert("name".into(), Value::String(name));
        }
        if let Some(address) = self.address {
            details.insert("address".into(), Value::String(address));
        }
        if let Some(date) = self.request_date {
            details.insert("requestDate".into(), Value::String(date));
        }
        VerificationPayload::verified(self.valid, details)
    }
}

/// One remote `checkIdentifier(countryCode, nationalNumber)` operation.
///
/// Implementations bound the call with their own timeout and map every
/// failure onto [`TransportError`].
#[async_trait]
pub trait VerificationTransport: Send + Sync {
    /// Look up a single identifier.
    async fn check_identifier(
        &self,
        country_code: &str,
        national_number: &str,
    ) -> Result<RemoteRecord, TransportError>;
}
