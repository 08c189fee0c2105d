//! Nullable peer: answer requests from a script instead of the network.

use dpos_peer::{PeerApi, PeerError, PeerRequest};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(u16),
    Unreachable,
}

impl Reply {
    fn into_result(self) -> Result<Value, PeerError> {
        match self {
            Reply::Json(v) => Ok(v),
            Reply::Status(code) => Err(PeerError::Status(code)),
            Reply::Unreachable => Err(PeerError::Request("connection refused".to_string())),
        }
    }
}

/// A test peer that serves canned JSON and records every request.
///
/// Routes are keyed by the request's display form (`path?k=v&...`) or by
/// absolute URL for [`PeerApi::get_url`]. Unscripted routes answer HTTP 404.
pub struct NullPeer {
    routes: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl NullPeer {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Answer `request` with `body`.
    pub fn respond(&self, request: &PeerRequest, body: Value) {
        self.script(request.to_string(), Reply::Json(body));
    }

    /// Answer an absolute URL with `body`.
    pub fn respond_url(&self, url: &str, body: Value) {
        self.script(url.to_string(), Reply::Json(body));
    }

    /// Answer `request` with an HTTP error status.
    pub fn fail(&self, request: &PeerRequest, status: u16) {
        self.script(request.to_string(), Reply::Status(status));
    }

    /// Make `request` fail as if the peer could not be reached.
    pub fn unreachable(&self, request: &PeerRequest) {
        self.script(request.to_string(), Reply::Unreachable);
    }

    /// Delay every answer, to exercise timeouts.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear the script and the request log.
    pub fn reset(&self) {
        self.routes.lock().unwrap().clear();
        self.requests.lock().unwrap().clear();
        *self.delay.lock().unwrap() = None;
    }

    fn script(&self, key: String, reply: Reply) {
        self.routes.lock().unwrap().insert(key, reply);
    }

    async fn answer(&self, key: String) -> Result<Value, PeerError> {
        self.requests.lock().unwrap().push(key.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.routes.lock().unwrap().get(&key).cloned();
        reply.unwrap_or(Reply::Status(404)).into_result()
    }
}

impl Default for NullPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerApi for NullPeer {
    async fn get(&self, request: &PeerRequest) -> Result<Value, PeerError> {
        self.answer(request.to_string()).await
    }

    async fn get_url(&self, url: &str) -> Result<Value, PeerError> {
        self.answer(url.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_route() {
        let peer = NullPeer::new();
        let req = PeerRequest::delegate_search("gen");
        peer.respond(&req, json!({ "success": true, "delegates": [] }));
        let body = peer.get(&req).await.unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(peer.requests(), vec![req.to_string()]);
    }

    #[tokio::test]
    async fn test_unscripted_route_is_404() {
        let peer = NullPeer::new();
        let err = peer.get(&PeerRequest::new("/api/peers")).await.unwrap_err();
        assert!(matches!(err, PeerError::Status(404)));
    }

    #[tokio::test]
    async fn test_failures() {
        let peer = NullPeer::new();
        let a = PeerRequest::new("/a");
        let b = PeerRequest::new("/b");
        peer.fail(&a, 500);
        peer.unreachable(&b);
        assert!(matches!(peer.get(&a).await, Err(PeerError::Status(500))));
        assert!(matches!(peer.get(&b).await, Err(PeerError::Request(_))));
    }

    #[tokio::test]
    async fn test_url_routes_are_separate() {
        let peer = NullPeer::new();
        peer.respond_url("https://example.org/list.json", json!([]));
        assert_eq!(
            peer.get_url("https://example.org/list.json").await.unwrap(),
            json!([])
        );
        peer.reset();
        assert!(peer.get_url("https://example.org/list.json").await.is_err());
        assert_eq!(peer.requests().len(), 1);
    }
}
