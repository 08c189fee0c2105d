//! The transport seam between the wallet and a remote peer.

use std::fmt;
use std::future::Future;

use dpos_types::{Address, PublicKey};

use crate::PeerError;

/// A GET request against the peer's HTTP API.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeerRequest {
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
}

impl PeerRequest {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// `GET /api/accounts?address=`
    pub fn account(address: &Address) -> Self {
        Self::new("/api/accounts").param("address", address)
    }

    /// `GET /api/transactions`, newest first, where `address` is sender or recipient.
    pub fn transactions(address: &Address, offset: u32, limit: u32) -> Self {
        Self::new("/api/transactions")
            .param("orderBy", "timestamp:desc")
            .param("offset", offset)
            .param("limit", limit)
            .param("recipientId", address)
            .param("senderId", address)
    }

    /// `GET /api/delegates/get/?publicKey=`
    pub fn delegate_by_public_key(public_key: &PublicKey) -> Self {
        Self::new("/api/delegates/get/").param("publicKey", public_key)
    }

    /// `GET /api/delegates/get/?username=`
    pub fn delegate_by_username(username: &str) -> Self {
        Self::new("/api/delegates/get/").param("username", username)
    }

    /// `GET /api/delegates/search/?term=`
    pub fn delegate_search(term: &str) -> Self {
        Self::new("/api/delegates/search/").param("term", term)
    }

    /// `GET /api/accounts/delegates/?address=`
    pub fn voted_delegates(address: &Address) -> Self {
        Self::new("/api/accounts/delegates/").param("address", address)
    }
}

impl fmt::Display for PeerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

/// Fetches JSON documents from a peer.
///
/// Implementations only report transport-level failures; a well-formed
/// response with `"success": false` is returned as `Ok` and interpreted by
/// the caller.
pub trait PeerApi: Send + Sync {
    /// GET a path on the configured peer.
    fn get(
        &self,
        request: &PeerRequest,
    ) -> impl Future<Output = Result<serde_json::Value, PeerError>> + Send;

    /// GET an absolute URL outside the peer (e.g. a published sponsor list).
    fn get_url(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, PeerError>> + Send;
}

impl<T: PeerApi> PeerApi for std::sync::Arc<T> {
    fn get(
        &self,
        request: &PeerRequest,
    ) -> impl Future<Output = Result<serde_json::Value, PeerError>> + Send {
        (**self).get(request)
    }

    fn get_url(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, PeerError>> + Send {
        (**self).get_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_request_orders_newest_first() {
        let a = Address::parse("AUexKj").unwrap();
        let req = PeerRequest::transactions(&a, 0, 100);
        assert_eq!(
            req.to_string(),
            "/api/transactions?orderBy=timestamp:desc&offset=0&limit=100&recipientId=AUexKj&senderId=AUexKj"
        );
    }

    #[test]
    fn delegate_requests_share_a_path() {
        let by_name = PeerRequest::delegate_by_username("genesis_1");
        assert_eq!(by_name.path, "/api/delegates/get/");
        assert_eq!(by_name.query, vec![("username", "genesis_1".to_string())]);
    }
}
