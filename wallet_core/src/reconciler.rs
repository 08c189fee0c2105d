//! Account cache reconciliation.
//!
//! [`AccountService`] fetches account, delegate and vote state from a peer,
//! normalizes it and merges it into the local cache. Reads that only need
//! the cache never touch the network.

use std::time::Duration;

use serde::de::DeserializeOwned;

use dpos_peer::responses::{
    AccountResponse, DelegateResponse, DelegatesResponse, TransactionsResponse,
};
use dpos_peer::{PeerApi, PeerError, PeerRequest};
use dpos_store::{KeyValueStore, WalletCache};
use dpos_types::params::DEFAULT_TRANSACTION_LIMIT;
use dpos_types::{
    Account, Address, DelegateInfo, PublicKey, Transaction, VoteBatch, VotedDelegate,
};

use crate::planner::{self, PlanError};
use crate::WalletError;

/// Reconciles the local cache with a remote peer.
pub struct AccountService<P, S> {
    peer: P,
    cache: WalletCache<S>,
    request_timeout: Duration,
}

impl<P: PeerApi, S: KeyValueStore> AccountService<P, S> {
    pub fn new(peer: P, store: S, request_timeout: Duration) -> Self {
        Self {
            peer,
            cache: WalletCache::new(store),
            request_timeout,
        }
    }

    pub fn peer(&self) -> &P {
        &self.peer
    }

    pub fn cache(&self) -> &WalletCache<S> {
        &self.cache
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    // ── Transport ───────────────────────────────────────────────────────

    /// GET a peer endpoint and decode the payload, bounded by the request timeout.
    async fn request<T: DeserializeOwned>(&self, request: &PeerRequest) -> Result<T, WalletError> {
        let value = tokio::time::timeout(self.request_timeout, self.peer.get(request))
            .await
            .map_err(|_| {
                tracing::warn!(%request, timeout = ?self.request_timeout, "peer request timed out");
                WalletError::Timeout(self.request_timeout)
            })?
            .map_err(|e| {
                tracing::warn!(%request, error = %e, "peer request failed");
                e
            })?;
        Ok(serde_json::from_value(value).map_err(PeerError::from)?)
    }

    /// GET an absolute URL, bounded by the request timeout.
    pub(crate) async fn request_url<T: DeserializeOwned>(&self, url: &str) -> Result<T, WalletError> {
        let value = tokio::time::timeout(self.request_timeout, self.peer.get_url(url))
            .await
            .map_err(|_| WalletError::Timeout(self.request_timeout))??;
        Ok(serde_json::from_value(value).map_err(PeerError::from)?)
    }

    // ── Accounts ────────────────────────────────────────────────────────

    async fn fetch_remote_account(&self, address: &Address) -> Result<Account, WalletError> {
        let resp: AccountResponse = self.request(&PeerRequest::account(address)).await?;
        match resp.account {
            Some(remote) if resp.success => Ok(Account::try_from(remote)?),
            _ => {
                tracing::debug!(%address, error = ?resp.error, "account unknown to peer, using placeholder");
                Ok(Account::placeholder(address.clone()))
            }
        }
    }

    /// Fetch an account from the peer, cache it and add it to the address index.
    ///
    /// An address the peer does not know yields a zero-balance cold
    /// placeholder, which is cached like any other account.
    pub async fn fetch_account(&self, address: &Address) -> Result<Account, WalletError> {
        let account = self.fetch_remote_account(address).await?;
        self.cache.put_account(&account)?;
        self.cache.index_address(address)?;
        tracing::debug!(%address, balance = account.balance, cold = account.is_cold(), "account cached");
        Ok(account)
    }

    /// Like [`Self::fetch_account`] but leaves the cache untouched.
    pub async fn fetch_account_and_forget(&self, address: &Address) -> Result<Account, WalletError> {
        self.fetch_remote_account(address).await
    }

    pub async fn refresh_account(&self, account: &Account) -> Result<Account, WalletError> {
        self.fetch_account(&account.address).await
    }

    /// The cached account with its satellite data, or `None` if never fetched.
    pub fn get_account(&self, address: &Address) -> Result<Option<Account>, WalletError> {
        Ok(self.cache.hydrated_account(address)?)
    }

    /// Every indexed account the user has named or budgeted.
    pub fn load_all_accounts(&self) -> Result<Vec<Account>, WalletError> {
        let index = self.cache.addresses()?;
        let mut accounts = Vec::new();
        for address in index.iter() {
            let named = self.cache.username(address)?.is_some();
            let budgeted = self.cache.virtual_ledger(address)?.is_some();
            if !(named || budgeted) {
                continue;
            }
            let account = self
                .cache
                .hydrated_account(address)?
                .unwrap_or_else(|| Account::placeholder(address.clone()));
            accounts.push(account);
        }
        Ok(accounts)
    }

    /// Remove an account and all of its satellite data from the cache.
    ///
    /// `None` is a no-op. An address that is not in the index is left
    /// untouched, since delegate lookups cache data for addresses the user
    /// never added; the account is still returned.
    pub fn delete_account(&self, account: Option<Account>) -> Result<Option<Account>, WalletError> {
        let Some(account) = account else {
            return Ok(None);
        };
        if self.cache.unindex_address(&account.address)? {
            self.cache.delete_account_data(&account.address)?;
            tracing::debug!(address = %account.address, "account deleted");
        } else {
            tracing::debug!(address = %account.address, "account not indexed, nothing deleted");
        }
        Ok(Some(account))
    }

    pub fn set_username(&self, address: &Address, username: &str) -> Result<(), WalletError> {
        self.cache.put_username(address, username)?;
        Ok(())
    }

    /// The user-assigned name, falling back to the address itself.
    pub fn get_username(&self, address: &Address) -> Result<String, WalletError> {
        Ok(self
            .cache
            .username(address)?
            .unwrap_or_else(|| address.to_string()))
    }

    // ── Transactions ────────────────────────────────────────────────────

    /// Fetch a page of history, newest first, and replace the cached history.
    pub async fn get_transactions(
        &self,
        address: &Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Transaction>, WalletError> {
        let request = PeerRequest::transactions(address, offset, limit);
        let resp: TransactionsResponse = self
            .request(&request)
            .await
            .map_err(|e| WalletError::FetchTransactions(e.to_string()))?;
        if !resp.success {
            return Err(WalletError::FetchTransactions(
                resp.error.unwrap_or_else(|| "peer reported failure".to_string()),
            ));
        }

        let transactions = resp
            .transactions
            .into_iter()
            .map(|t| t.into_transaction(address))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| WalletError::FetchTransactions(e.to_string()))?;

        self.cache.put_transactions(address, &transactions)?;
        tracing::debug!(%address, count = transactions.len(), "transactions cached");
        Ok(transactions)
    }

    /// The first page of history with the default page size.
    pub async fn latest_transactions(&self, address: &Address) -> Result<Vec<Transaction>, WalletError> {
        self.get_transactions(address, 0, DEFAULT_TRANSACTION_LIMIT).await
    }

    // ── Delegates ───────────────────────────────────────────────────────

    /// Look a delegate up by public key without caching it.
    pub(crate) async fn lookup_delegate(
        &self,
        public_key: &PublicKey,
    ) -> Result<Option<DelegateInfo>, WalletError> {
        let resp: DelegateResponse = self
            .request(&PeerRequest::delegate_by_public_key(public_key))
            .await?;
        match resp.delegate {
            Some(remote) if resp.success => Ok(Some(DelegateInfo::try_from(remote)?)),
            _ => Ok(None),
        }
    }

    fn cache_delegate(&self, delegate: &DelegateInfo) -> Result<(), WalletError> {
        self.cache.put_delegate(delegate)?;
        self.cache.put_username(&delegate.address, &delegate.username)?;
        tracing::debug!(address = %delegate.address, username = %delegate.username, "delegate cached");
        Ok(())
    }

    /// The delegate registered with `public_key`.
    ///
    /// Caches the delegate record and its username under the delegate's own
    /// address.
    pub async fn get_delegate(&self, public_key: &str) -> Result<DelegateInfo, WalletError> {
        if public_key.trim().is_empty() {
            return Err(WalletError::MissingPublicKey);
        }
        let public_key = PublicKey::parse(public_key.trim())?;
        let delegate = self
            .lookup_delegate(&public_key)
            .await?
            .ok_or(WalletError::NotADelegate)?;
        self.cache_delegate(&delegate)?;
        Ok(delegate)
    }

    pub async fn get_delegate_by_username(&self, username: &str) -> Result<DelegateInfo, WalletError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(WalletError::MissingUsername);
        }
        let resp: DelegateResponse = self
            .request(&PeerRequest::delegate_by_username(username))
            .await?;
        let delegate = match resp.delegate {
            Some(remote) if resp.success => DelegateInfo::try_from(remote)?,
            _ => return Err(WalletError::DelegateNotFound(username.to_string())),
        };
        self.cache_delegate(&delegate)?;
        Ok(delegate)
    }

    /// Delegates whose username matches `term`. Results are not cached.
    pub async fn search_delegates(&self, term: &str) -> Result<Vec<DelegateInfo>, WalletError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(WalletError::MissingSearchTerm);
        }
        let search_failed = |_| WalletError::DelegateSearch(term.to_string());
        let resp: DelegatesResponse = self
            .request(&PeerRequest::delegate_search(term))
            .await
            .map_err(search_failed)?;
        if !resp.success {
            return Err(WalletError::DelegateSearch(term.to_string()));
        }
        resp.delegates
            .into_iter()
            .map(|d| DelegateInfo::try_from(d).map_err(|_| WalletError::DelegateSearch(term.to_string())))
            .collect()
    }

    // ── Votes ───────────────────────────────────────────────────────────

    /// Fetch the delegates `address` votes for and replace the cached vote set.
    pub async fn get_voted_delegates(&self, address: &Address) -> Result<Vec<VotedDelegate>, WalletError> {
        let resp: DelegatesResponse = self
            .request(&PeerRequest::voted_delegates(address))
            .await
            .map_err(|e| WalletError::FetchVotedDelegates(e.to_string()))?;
        if !resp.success {
            return Err(WalletError::FetchVotedDelegates(
                resp.error.unwrap_or_else(|| "peer reported failure".to_string()),
            ));
        }

        let voted = resp
            .delegates
            .into_iter()
            .map(|d| DelegateInfo::try_from(d).map(VotedDelegate::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| WalletError::FetchVotedDelegates(e.to_string()))?;

        self.cache.put_voted_delegates(address, &voted)?;
        tracing::debug!(%address, count = voted.len(), "vote set cached");
        Ok(voted)
    }

    /// Plan the vote batches from the cached vote set of `address` to `target`.
    pub fn plan_vote_diff(
        &self,
        address: &Address,
        target: &[VotedDelegate],
    ) -> Result<Vec<VoteBatch>, PlanError> {
        planner::plan_vote_diff(&self.cache, address, target)
    }
}
