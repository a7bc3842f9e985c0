//! HTTP transports: the EU VIES REST API and a generic JSON registry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::transport::{RemoteRecord, VerificationTransport};
use crate::core::{ConfigError, ExternalRegistryConfig, SetupError, TransportError, ViesConfig};

/// VIES marks withheld name/address fields with this placeholder.
const VIES_PLACEHOLDER: &str = "---";

/// Longest error body carried into a [`TransportError::Api`].
const MAX_ERROR_BODY: usize = 512;

fn network(err: reqwest::Error, timeout: std::time::Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(err.to_string())
    }
}

fn truncated(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| v != VIES_PLACEHOLDER && !v.trim().is_empty())
}

/// POST `payload` and return the body of a successful response.
async fn post_json<B: Serialize + ?Sized>(
    request: reqwest::RequestBuilder,
    payload: &B,
    timeout: std::time::Duration,
) -> Result<String, TransportError> {
    let resp = request
        .json(payload)
        .send()
        .await
        .map_err(|e| network(e, timeout))?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| network(e, timeout))?;

    if !status.is_success() {
        return Err(TransportError::Api {
            status: status.as_u16(),
            body: truncated(&body),
        });
    }
    Ok(body)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

impl ViesApiResponse {
    fn into_record(self) -> Result<RemoteRecord, TransportError> {
        if let Some(err) = self.error_wrappers.as_deref().and_then(<[_]>::first) {
            let msg = err
                .message
                .clone()
                .or_else(|| err.error.clone())
                .unwrap_or_else(|| "unknown error".into());
            return Err(TransportError::Fault(msg));
        }
        let Some(valid) = self.valid else {
            return Err(TransportError::Parse("missing `valid` flag".into()));
        };
        Ok(RemoteRecord {
            valid,
            name: present(self.name),
            address: present(self.address),
            request_date: self.request_date,
        })
    }
}

/// Transport for the EU VIES `check-vat-number` REST operation.
///
/// No authentication; the service is public. Member-state outages come
/// back as `errorWrappers` and are reported as [`TransportError::Fault`].
#[derive(Debug, Clone)]
pub struct ViesRestTransport {
    http: reqwest::Client,
    url: String,
    timeout: std::time::Duration,
}

impl ViesRestTransport {
    /// Build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ViesConfig) -> Result<Self, TransportError> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            http,
            url: config.url.clone(),
            timeout,
        })
    }
}

#[async_trait]
impl VerificationTransport for ViesRestTransport {
    async fn check_identifier(
        &self,
        country_code: &str,
        national_number: &str,
    ) -> Result<RemoteRecord, TransportError> {
        let req = ViesRequest {
            country_code,
            vat_number: national_number,
        };
        let body = post_json(self.http.post(&self.url), &req, self.timeout).await?;
        let api: ViesApiResponse =
            serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))?;
        api.into_record()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistryRequest<'a> {
    country_code: &'a str,
    national_number: &'a str,
}

/// Transport for any registry answering `{valid, name?, address?, requestDate?}`.
///
/// Used for the optional Swiss lookup.
#[derive(Debug, Clone)]
pub struct JsonRegistryTransport {
    http: reqwest::Client,
    url: String,
    api_key: Option<(String, String)>,
    timeout: std::time::Duration,
}

impl JsonRegistryTransport {
    /// Build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if the URL is empty and
    /// [`SetupError::Transport`] if the client cannot be built.
    pub fn new(config: &ExternalRegistryConfig) -> Result<Self, SetupError> {
        if config.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ch.url".into(),
                value: config.url.clone(),
                reason: "required when the registry is enabled",
            }
            .into());
        }
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let api_key = config
            .api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .map(|k| (config.api_key_header.clone(), k.clone()));
        Ok(Self {
            http,
            url: config.url.clone(),
            api_key,
            timeout,
        })
    }
}

#[async_trait]
impl VerificationTransport for JsonRegistryTransport {
    async fn check_identifier(
        &self,
        country_code: &str,
        national_number: &str,
    ) -> Result<RemoteRecord, TransportError> {
        let mut request = self.http.post(&self.url);
        if let Some((header, key)) = &self.api_key {
            request = request.header(header.as_str(), key.as_str());
        }
        let req = RegistryRequest {
            country_code,
            national_number,
        };
        let body = post_json(request, &req, self.timeout).await?;
        let mut record: RemoteRecord =
            serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))?;
        record.name = present(record.name);
        record.address = present(record.address);
        Ok(record)
    }
}
