//! HTTP client for a remote peer.

use std::time::Duration;

use crate::api::{PeerApi, PeerRequest};
use crate::PeerError;

/// Wraps `reqwest::Client` with the peer's base URL.
#[derive(Clone)]
pub struct PeerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PeerClient {
    /// Create a client targeting `base_url` (e.g. `http://127.0.0.1:4001`).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, PeerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| PeerError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, PeerError> {
        let response = builder
            .send()
            .await
            .map_err(|e| PeerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PeerError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| PeerError::InvalidResponse(e.to_string()))
    }
}

impl PeerApi for PeerClient {
    async fn get(&self, request: &PeerRequest) -> Result<serde_json::Value, PeerError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(peer = %self.base_url, request = %request, "peer GET");
        self.fetch_json(self.http.get(url).query(&request.query)).await
    }

    async fn get_url(&self, url: &str) -> Result<serde_json::Value, PeerError> {
        tracing::debug!(url, "external GET");
        self.fetch_json(self.http.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = PeerClient::new(
            "http://127.0.0.1:4001/",
            Duration::from_secs(5),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:4001");
    }

    #[tokio::test]
    async fn unreachable_peer_is_a_request_error() {
        let client = PeerClient::new(
            "http://127.0.0.1:1",
            Duration::from_secs(2),
            Duration::from_secs(1),
        )
        .unwrap();
        let err = client
            .get(&PeerRequest::new("/api/peers"))
            .await
            .unwrap_err();
        assert!(matches!(err, PeerError::Request(_)));
    }
}
