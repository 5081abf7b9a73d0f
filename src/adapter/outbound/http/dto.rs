//! Response envelopes for the market-data API.
//!
//! Every endpoint answers `{ "status": ..., "<payload field>": ..., "error"? }`.
//! [`Envelope::into_payload`] separates the failure status from the payload
//! so the client only deserializes the part it needs.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::ProviderStatus;
use crate::error::ApiError;

/// Status value the API uses for successful responses.
pub const STATUS_SUCCESS: &str = "success";

/// Generic response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Envelope {
    /// True when the body reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    /// The failure message the server reported, or a generic one.
    #[must_use]
    pub fn failure_message(&self, http_status: u16) -> String {
        match (&self.error, &self.status) {
            (Some(error), _) if !error.trim().is_empty() => error.clone(),
            (_, Some(status)) if status != STATUS_SUCCESS => {
                format!("request failed with status '{status}' (HTTP {http_status})")
            }
            _ => format!("request failed (HTTP {http_status})"),
        }
    }

    /// Take and deserialize the payload stored under `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the field is missing or malformed.
    pub fn into_payload<T: DeserializeOwned>(
        mut self,
        endpoint: &'static str,
        field: &str,
    ) -> Result<T, ApiError> {
        let value = self.fields.remove(field).ok_or_else(|| ApiError::Decode {
            endpoint,
            detail: format!("missing field '{field}'"),
        })?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            endpoint,
            detail: format!("field '{field}': {e}"),
        })
    }
}

/// One entry of the `providers` status map.
#[derive(Debug, Deserialize)]
pub struct ProviderStatusDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub available: bool,
}

/// Convert the status map into domain entries, in key order.
#[must_use]
pub fn provider_statuses(map: BTreeMap<String, ProviderStatusDto>) -> Vec<ProviderStatus> {
    map.into_iter()
        .map(|(key, dto)| ProviderStatus::new(key, dto.name, dto.available))
        .collect()
}
