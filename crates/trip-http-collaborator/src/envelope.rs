//! Response envelope decoding
//!
//! The backend answers with one of three JSON shapes:
//!
//! - `{"data": ...}` on success (status 200)
//! - `{"error": "..."}` when the backend itself failed (status 200)
//! - `{"detail": ...}` when it rejected the request, either with status 200
//!   or as a 4xx query validation failure (`422` with a list of problems)

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use trip_workflow::{CollaboratorError, DestinationOption, DestinationOptions};

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Decode a response body into its `data` payload
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CollaboratorError> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| CollaboratorError::decode(format!("invalid response body: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(CollaboratorError::Backend(error));
    }
    if let Some(detail) = envelope.detail {
        return Err(CollaboratorError::Rejected(detail_message(detail)));
    }
    envelope
        .data
        .ok_or_else(|| CollaboratorError::decode("response has no data"))
}

/// Rejection carried by a 4xx body, if it has the `detail` shape
pub fn rejection(body: &str) -> Option<CollaboratorError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).ok()?;
    envelope
        .detail
        .map(|detail| CollaboratorError::Rejected(detail_message(detail)))
}

fn detail_message(detail: serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(message) => message,
        other => other.to_string(),
    }
}

/// Search results as the backend sends them
///
/// Either a map keyed by destination, or a list of options that each carry
/// their own `destination`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchPayload {
    Keyed(BTreeMap<String, DestinationOption>),
    Listed(Vec<DestinationOption>),
}

impl SearchPayload {
    /// Key every option by its destination
    pub fn into_options(self) -> DestinationOptions {
        match self {
            Self::Keyed(map) => map
                .into_iter()
                .map(|(destination, mut option)| {
                    option.destination = destination.clone();
                    (destination, option)
                })
                .collect(),
            Self::Listed(list) => {
                let mut options = DestinationOptions::new();
                for option in list {
                    if option.destination.is_empty() {
                        log::warn!("Skipping search result without a destination");
                        continue;
                    }
                    if let Some(previous) = options.insert(option.destination.clone(), option) {
                        log::debug!("Duplicate search result for {}", previous.destination);
                    }
                }
                options
            }
        }
    }
}
