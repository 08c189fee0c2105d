//! Fundamental types for the DPoS wallet.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, public keys, amounts, network timestamps, protocol constants, and the
//! entity records the wallet caches locally (accounts, delegates, transactions,
//! votes, virtual ledgers).

pub mod account;
pub mod address;
pub mod amount;
pub mod delegate;
pub mod error;
pub mod keys;
pub mod params;
pub mod time;
pub mod transaction;
pub mod virtual_ledger;
pub mod vote;

pub use account::Account;
pub use address::Address;
pub use amount::{format_units, parse_units};
pub use delegate::DelegateInfo;
pub use error::TypesError;
pub use keys::PublicKey;
pub use time::{NetworkTimestamp, Timestamp};
pub use transaction::{Transaction, TransactionType};
pub use virtual_ledger::{Folder, VirtualLedger};
pub use vote::{VoteBatch, VoteDiffAssertion, VoteDirection, VotedDelegate};
