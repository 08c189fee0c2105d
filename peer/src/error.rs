//! Transport errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("peer returned HTTP {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for PeerError {
    fn from(e: serde_json::Error) -> Self {
        PeerError::InvalidResponse(e.to_string())
    }
}
