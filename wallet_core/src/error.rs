use std::time::Duration;

use thiserror::Error;

use dpos_peer::PeerError;
use dpos_store::StoreError;
use dpos_transactions::{SignerError, TransactionError};
use dpos_types::{Address, TypesError};

use crate::planner::PlanError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no public key")]
    MissingPublicKey,

    #[error("no username")]
    MissingUsername,

    #[error("no search term")]
    MissingSearchTerm,

    #[error("cannot state if account is a delegate")]
    NotADelegate,

    #[error("cannot find delegate: {0}")]
    DelegateNotFound(String),

    #[error("cannot find delegates from this term: {0}")]
    DelegateSearch(String),

    #[error("cannot get transactions: {0}")]
    FetchTransactions(String),

    #[error("cannot get voted delegates: {0}")]
    FetchVotedDelegates(String),

    #[error("cannot get sponsors: {0}")]
    SponsorsUnavailable(String),

    #[error("passphrase does not match address {0}")]
    PassphraseMismatch(Address),

    #[error("account {0} is not cached")]
    AccountNotCached(Address),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("peer request timed out after {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("peer error: {0}")]
    Peer(#[from] PeerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("transaction building error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("signing error: {0}")]
    Signing(#[from] SignerError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
