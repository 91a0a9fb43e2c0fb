//! One-shot profile fetch from the remote API.
//!
//! Fired once at startup. There is no retry, timeout, or cancellation;
//! a failure is logged by the caller and the dashboard stays on its
//! loading screen.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::model::{ItemsResponse, Profile};

/// Built-in profile endpoint, overridable via the config file.
pub const DEFAULT_ENDPOINT: &str =
    "https://497pklv78d.execute-api.us-east-1.amazonaws.com/api/items";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// HTTP client for the profile endpoint.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    client: Client,
    endpoint: String,
}

impl ProfileClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the full record list. No query parameters, no auth headers.
    pub async fn fetch_profiles(&self) -> Result<Vec<Profile>> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let payload: ItemsResponse = serde_json::from_str(&body)?;
        Ok(payload.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_client() {
        let client = ProfileClient::new(DEFAULT_ENDPOINT);
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_decode_error_from_bad_payload() {
        let err = serde_json::from_str::<ItemsResponse>("{\"items\": 3}")
            .map_err(FetchError::from)
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
