//! Sponsor delegates published in an external list.

use futures_util::future::join_all;
use serde::Serialize;

use dpos_peer::responses::SponsorEntry;
use dpos_peer::PeerApi;
use dpos_store::KeyValueStore;
use dpos_types::{DelegateInfo, PublicKey};

use crate::reconciler::AccountService;
use crate::WalletError;

/// A sponsor entry that did not resolve to a delegate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SponsorFailure {
    pub public_key: String,
    pub reason: String,
}

/// Outcome of resolving a sponsor list: delegates in list order plus every
/// entry that failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SponsorReport {
    pub delegates: Vec<DelegateInfo>,
    pub failures: Vec<SponsorFailure>,
}

impl<P: PeerApi, S: KeyValueStore> AccountService<P, S> {
    /// Fetch the sponsor list at `list_url` and look every entry up concurrently.
    ///
    /// Lookups are not cached. Only a failure to fetch or decode the list
    /// itself is an error.
    pub async fn get_sponsors(&self, list_url: &str) -> Result<SponsorReport, WalletError> {
        let entries: Vec<SponsorEntry> = self
            .request_url(list_url)
            .await
            .map_err(|e| WalletError::SponsorsUnavailable(e.to_string()))?;

        let lookups = entries.iter().map(|entry| async move {
            let public_key = PublicKey::parse(entry.public_key.trim())?;
            self.lookup_delegate(&public_key)
                .await?
                .ok_or(WalletError::NotADelegate)
        });
        let results = join_all(lookups).await;

        let mut report = SponsorReport::default();
        for (entry, result) in entries.iter().zip(results) {
            match result {
                Ok(delegate) => report.delegates.push(delegate),
                Err(e) => {
                    tracing::warn!(public_key = %entry.public_key, error = %e, "sponsor lookup failed");
                    report.failures.push(SponsorFailure {
                        public_key: entry.public_key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        tracing::debug!(
            found = report.delegates.len(),
            failed = report.failures.len(),
            "sponsors resolved"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_nullables::{NullPeer, NullStore};
    use dpos_peer::PeerRequest;
    use serde_json::json;
    use std::time::Duration;

    const LIST: &str = "https://sponsors.example/list.json";

    fn pk(n: u8) -> PublicKey {
        PublicKey::from_bytes(&[n; 33])
    }

    #[tokio::test]
    async fn partial_failures_are_reported_in_order() {
        let svc = AccountService::new(NullPeer::new(), NullStore::new(), Duration::from_secs(5));
        svc.peer().respond_url(
            LIST,
            json!([
                { "publicKey": pk(1).to_string(), "name": "one" },
                { "publicKey": pk(2).to_string() },
                { "publicKey": "not-a-key" },
                { "publicKey": pk(3).to_string() }
            ]),
        );
        for (n, name) in [(1u8, "one"), (3, "three")] {
            svc.peer().respond(
                &PeerRequest::delegate_by_public_key(&pk(n)),
                json!({ "success": true, "delegate": {
                    "username": name, "address": format!("A{name}"), "publicKey": pk(n).to_string()
                }}),
            );
        }
        svc.peer().respond(
            &PeerRequest::delegate_by_public_key(&pk(2)),
            json!({ "success": false }),
        );

        let report = svc.get_sponsors(LIST).await.unwrap();
        let names: Vec<_> = report.delegates.iter().map(|d| d.username.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].public_key, pk(2).to_string());
        assert_eq!(report.failures[1].public_key, "not-a-key");
        assert!(svc.cache().store().is_empty());
    }

    #[tokio::test]
    async fn unreachable_list_is_an_error() {
        let svc = AccountService::new(NullPeer::new(), NullStore::new(), Duration::from_secs(5));
        assert!(matches!(
            svc.get_sponsors(LIST).await,
            Err(WalletError::SponsorsUnavailable(_))
        ));
    }
}
